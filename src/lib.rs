//! Lossy self-similarity codec for one-dimensional numeric sequences.
//!
//! Windows of the input are sampled at golden-ratio scales, correlated
//! against each other, and repeated windows are replaced by references to
//! a single stored master. Positions no master or reference covers are
//! kept verbatim as residuals.
//!
//! The pairwise search costs `O(segments² × segment_size)` per scale, so
//! inputs beyond a few thousand samples slow down quadratically. Callers
//! with larger inputs should split them first. The whole sequence must be
//! in memory.
//!
//! ```
//! use phicodec::{analyze, decode, encode, CodecConfig};
//!
//! let data = [1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0,
//!             1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0];
//! let cfg = CodecConfig { ratio: 0.5, ..CodecConfig::default() };
//! let outcome = encode(&data, &cfg).unwrap();
//! assert!(outcome.is_success());
//! assert_eq!(decode(&outcome).unwrap(), data.to_vec());
//! assert_eq!(analyze(&data, &outcome).unwrap().mean_squared_error, 0.0);
//! ```

pub mod analysis;
pub mod config;
pub mod container;
pub mod decode;
pub mod encode;
pub mod error;
pub mod io_utils;
pub mod ratio;
pub mod scale;
pub mod segment;
pub mod select;
pub mod series;
pub mod similarity;
pub mod stats;

pub use analysis::{analyze, mean_squared_error, peak_signal_to_noise_ratio, QualityReport};
pub use config::{CodecConfig, INV_PHI};
pub use container::{
    load_container, read_container, read_container_with_limit, save_container, write_container,
    ContainerError,
};
pub use decode::{decode, decode_structure, GAP_FILL};
pub use encode::{
    encode, EncodeOutcome, EncodedHeader, EncodedStructure, Encoding, MasterRecord,
    NoPatternReport, ReferenceRecord, ResidualRecord,
};
pub use error::CodecError;
pub use ratio::{estimate_ratio, REFERENCE_COST};
pub use scale::{sample_scales, ScaleDescriptor};
pub use segment::{segment, Segment};
pub use select::{select_patterns, select_patterns_with_stats, ScaleResult};
pub use similarity::{find_clusters, pearson_correlation, Cluster, Match};
pub use stats::SelectionStats;
