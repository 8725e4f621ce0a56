//! ContentBlock - free-form markup written by editors.

use pardaz_api::{ComponentProps, ComponentTag, Props};

use super::SiteComponent;

pub struct ContentBlock;

impl SiteComponent for ContentBlock {
    fn tag(&self) -> ComponentTag {
        ComponentTag::ContentBlock
    }

    fn configure(&self, props: &Props) -> Result<ComponentProps, serde_json::Error> {
        Ok(ComponentProps::ContentBlock(ComponentProps::decode(props)?))
    }

    /// The content is trusted editor markup and is emitted verbatim.
    fn markup(&self, props: &ComponentProps) -> String {
        let content = match props {
            ComponentProps::ContentBlock(block) => block.content.as_str(),
            _ => "",
        };
        format!("<div class=\"prose prose-lg max-w-none\">{content}</div>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_is_emitted_verbatim() {
        let props = Props::from_pairs([("content", "<h2>Hi</h2><p>there</p>")]);
        let configured = ContentBlock.configure(&props).unwrap();
        assert_eq!(
            ContentBlock.markup(&configured),
            "<div class=\"prose prose-lg max-w-none\"><h2>Hi</h2><p>there</p></div>"
        );
    }

    #[test]
    fn test_missing_content_renders_empty_block() {
        let configured = ContentBlock.configure(&Props::new()).unwrap();
        assert_eq!(
            ContentBlock.markup(&configured),
            "<div class=\"prose prose-lg max-w-none\"></div>"
        );
    }

    #[test]
    fn test_non_string_content_is_invalid() {
        let props = Props::from_pairs([("content", json!(3))]);
        assert!(ContentBlock.configure(&props).is_err());
    }
}
