//! Reactive model core: change-tracking views over plain JSON data with
//! dirty checking, declarative validation, and reset-to-original.
//!
//! The caller owns an "original" value; [`Model`] clones it into a private
//! snapshot that is edited through [`TrackedView`] handles. The controller
//! answers [`Model::is_dirty`] by comparing canonical serializations and
//! [`Model::find_errors`] by running a compiled schema validator against
//! the snapshot. Single-threaded by construction: every operation completes
//! synchronously, and change notifications fire before control returns.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use use_model_core::Model;
//! use use_model_schema::{SchemaBuilder, StrSchema};
//!
//! let b = SchemaBuilder::new();
//! let schema = b.obj(vec![b.key(
//!     "name",
//!     b.str_of(StrSchema { min_length: Some(5), ..Default::default() }),
//! )]);
//! let mut model = Model::new(json!({"name": "Jochen"}), Some(&schema)).unwrap();
//!
//! let view = model.view();
//! view.set("name", "Jo").unwrap();
//! assert!(model.is_dirty());
//! assert_eq!(model.find_errors(Some("name")).len(), 1);
//!
//! model.reset();
//! assert!(!model.is_dirty());
//! assert!(model.find_errors(None).is_empty());
//! ```

mod path;
pub use path::{format_field_path, PathStep};

mod events;
pub use events::{ChangeNotice, ChangeOrigin};

mod view;
pub use view::{Read, TrackedView, ValueKind};

mod model;
pub use model::Model;

pub use use_model_schema::{CompileError, FieldError};
pub use use_model_util::NormalizeError;
