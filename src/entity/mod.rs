//! Documents as they are stored in MongoDB.
//!
//! Identities are native `ObjectId`s here; the API views in [`crate::models`]
//! carry them as hex strings.

pub mod carts;
pub mod products;
pub mod stamp;
pub mod users;

pub use carts::CartDocument;
pub use products::{ProductDocument, ProductPatch};
pub use stamp::StoredTimeStamp;
pub use users::UserDocument;
