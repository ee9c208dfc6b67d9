//! Configuration section definitions.
//!
//! Each module corresponds to a section in `manuscript.toml`:
//!
//! | Module      | TOML Section    | Purpose                               |
//! |-------------|-----------------|---------------------------------------|
//! | `build`     | `[build]`       | Source/output paths, ordering, policy |
//! | `transform` | `[transform]`   | Header, fence and link rewriting      |

mod build;
mod transform;

pub use build::{BuildConfig, ChapterOrder, MismatchPolicy};
pub use transform::{HeaderMode, LinkRewrite, TransformConfig};
