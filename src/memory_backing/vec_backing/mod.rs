mod cache_config;
mod cached_disk_vec;
mod disk_vec;

pub use cache_config::CacheConfig;
pub use cached_disk_vec::CachedDiskVec;
pub use disk_vec::DiskVec;
