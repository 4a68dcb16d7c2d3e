//! Style resolution for web targets.
//!
//! Given a widget tree, this crate decides which element every widget chain
//! renders as, computes its CSS, names its declaration and, for shared-style
//! emission, collapses structurally equal declarations into one.
//!
//! # Example
//!
//! ```ignore
//! use weft_style::{MapPreferences, ReservedWords, ScopedVariableNamer, StyleMapBuilder, StyleRepository};
//!
//! let mut namer = ScopedVariableNamer::new(&widget.key.id, ReservedWords::React);
//! let map = StyleMapBuilder::new(&widget, &mut namer, MapPreferences::default());
//! let repository = StyleRepository::new(map.into_map(), true);
//! for declaration in repository.uniques() {
//!     println!("{}", declaration.name);
//! }
//! ```

pub mod css;
pub mod element;
pub mod mapping;
pub mod naming;
pub mod repository;
pub mod resolve;

pub use css::CssProperties;
pub use element::{element_of, AttrValue, Attribute, ElementSpec};
pub use mapping::{MapPreferences, StyleDeclaration, StyleEntry, StyleMapBuilder};
pub use naming::{legal_identifier, ReservedWords, ScopedVariableNamer};
pub use repository::StyleRepository;
pub use resolve::{child_placements, css_of, Placement};
