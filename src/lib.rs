//! Brickset 레고 카탈로그 웹 서비스 클라이언트
//!
//! ```no_run
//! use brickset::{Client, SetQuery};
//!
//! let client = Client::new("my-api-key")?;
//! let query = SetQuery::builder().query("Jabba's Palace").build()?;
//! for set in client.get_sets(&query)? {
//!     println!("{} ({:?} pieces)", set, set.pieces());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod configs;
pub mod item;
pub mod request;

pub use client::error::{ApiError, RequestError};
pub use client::transport::{HttpResponse, HttpTransport, Transport};
pub use client::{Client, DEFAULT_BASE_URL};
pub use configs::ClientConfig;
pub use item::{Build, Review};
pub use request::{OrderBy, SetQuery, SortField};
