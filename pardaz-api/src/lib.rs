//! Pardaz API - Shared types for the site layout model.
//!
//! Pages hold ordered lists of [`Section`]s; each section names a
//! [`ComponentTag`], carries an open [`Props`] bag and a [`Wrapper`]
//! describing its styling envelope.

mod component;
mod event;
mod page;
mod props;
mod section;

pub use component::*;
pub use event::*;
pub use page::*;
pub use props::*;
pub use section::*;
