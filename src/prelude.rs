//! Common imports.
//!
//! ```
//! use kvs::prelude::*;
//! ```

pub use crate::error::{Error, Result};
pub use crate::facade::KeyValueFacade;
pub use kvs_core::{build_key, job_key, product_key, random_id, sites_key, KvsConfig};
pub use kvs_store::{ClientOptions, Payload};
