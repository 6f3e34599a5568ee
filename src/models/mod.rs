//! Types that are really the bedrock of tagging.

pub mod association;
pub mod taggable;
pub mod tags;
