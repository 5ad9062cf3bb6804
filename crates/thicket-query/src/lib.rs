//! Path queries over Thicket document trees.
//!
//! A small XPath-like language for locating nodes:
//!
//! - `//p` or `p` - every `p` element at or below the receiver
//! - `/html/body/p` - exact child-name steps from the receiver
//! - `@href` - elements with an `href` attribute
//! - `.note` - elements with the class token `note`
//! - `#main` - the first element with `id="main"`
//! - `base[2]`, `base[position()=2]`, `base[@a="v"]`, `base[@a]` - narrow the
//!   results of `base`; predicates nest (`//li[@class="x"][1]`)
//!
//! Queries only read the tree and never fail. Results are [`NodeRef`]
//! handles into the queried tree, in document order.
//!
//! ```ignore
//! use thicket_query::Queryable;
//!
//! let tree = thicket_core::parse(r#"<div class="a b"><p id="x">Hi</p><p>Bye</p></div>"#)?;
//! assert_eq!(tree.count("//p"), 2);
//! assert_eq!(tree.text_of_first("//p[2]").as_deref(), Some("Bye"));
//! ```
//!
//! [`NodeRef`]: thicket_dom::NodeRef

mod evaluate;
/// Pattern parsing into the [`Query`] value.
pub mod pattern;
mod queryable;

pub use pattern::{Predicate, Query};
pub use queryable::{
    Queryable, attribute_of_first, count, exists, first, query, text_of_first,
};
