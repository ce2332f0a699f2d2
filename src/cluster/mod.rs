//! Clustering on top of a learned topology.
//!
//! A growing neural gas does not assign points to clusters by itself; it
//! learns a graph. Once trained, the graph's connected components are the
//! clusters: regions separated by empty space end up with no edges between
//! them, because nothing refreshes those edges and they age out.
//!
//! ```rust
//! use gng::cluster::{Clustering, GngClustering};
//! use gng::GngConfig;
//!
//! let data: Vec<Vec<f64>> = (0..100)
//!     .map(|i| vec![(i % 2) as f64 * 50.0, (i as f64 * 0.37).sin()])
//!     .collect();
//!
//! let labels = GngClustering::new(GngConfig::default().with_insertion_interval(10))
//!     .with_epochs(3)
//!     .with_seed(7)
//!     .fit_predict(&data)
//!     .unwrap();
//! assert_eq!(labels.len(), data.len());
//! ```

mod gng;
mod traits;

pub use self::gng::GngClustering;
pub use traits::Clustering;
