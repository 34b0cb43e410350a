//! Client core for the Fintrack backend.
//!
//! Everything between the wire and the screen lives here: the shared [`Session`], the JSON
//! [`HttpClient`], one generic [`ResourceClient`] per soft-deletable resource, the
//! [`EntityList`] state with its active/deleted collections, the [`CrudForm`] controller, the
//! validation rules, the single-slot [`Notifier`] and the [`TableModel`] handed to the
//! front-end.

pub mod auth;
pub mod categories;
pub mod error;
pub mod form;
pub mod goals;
pub mod http;
pub mod list;
pub mod money;
pub mod notify;
pub mod resource;
pub mod session;
pub mod table;
pub mod validation;
pub mod wallets;

pub use auth::AuthClient;
pub use error::{ClientError, SessionError};
pub use form::{CrudForm, FormMode, SubmitOutcome};
pub use http::HttpClient;
pub use list::{EntityList, LoadTicket, Tab};
pub use notify::{Notification, Notifier, Severity};
pub use resource::{CrudApi, Descriptor, Resource, ResourceClient};
pub use session::{Session, SessionStore};
pub use table::{CellValue, RowAction, TableModel};
