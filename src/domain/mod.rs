//! Catalog domain types. No I/O lives here.

mod filter;
mod ids;
mod item;
mod outcome;
mod principal;
mod user;

pub use filter::FilterSpec;
pub use ids::{ItemId, SubjectId};
pub use item::{CatalogItem, ItemInput};
pub use outcome::{ItemsView, QueryMode, QueryOutcome};
pub use principal::{IdentityState, Principal};
pub use user::{Profile, ProfilePatch, UserAccount, UserPatch};
