/*! # `taggable`

Free-form tags for any kind of record, stored in SQLite.

## Purpose

Records of any type can be tagged, untagged, and searched by their tags. Each tag is stored once and shared by every record that uses it; a join table links tags to records through a `(type, id)` pair.

A tag's identity is its *slug*: `"Red Car"`, `"red-car"`, and `"  RED   CAR "` are all the same tag.

## Usage

```rust,ignore
use taggable::prelude::*;

struct Photo {
    id: Uuid,
}

impl Taggable for Photo {
    fn taggable_type() -> &'static str {
        "photo"
    }

    fn taggable_id(&self) -> Uuid {
        self.id
    }
}

let db = Database::connect(folder).await?;
let store = TagStore::new(db, Config::default());

let photo = Photo { id: Uuid::new_v4() };
store.tags_for(&photo).tag("beach, Sun Set").await?;

assert_eq!(store.tags_for(&photo).tag_list_normalized().await?, "beach,sun-set");

let beachy = store.find_ids(&store.with_all_tags::<Photo>("Beach")).await?;
```
*/

pub mod config;
pub mod database;
pub mod error;
pub mod manager;
pub mod models;
pub mod parse;
pub mod search;
pub mod slug;
pub mod store;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::database::Database;
    pub use crate::error::TagError;
    pub use crate::manager::TagManager;
    pub use crate::models::{
        taggable::{Taggable, TaggableKey},
        tags::Tag,
    };
    pub use crate::parse::TagInput;
    pub use crate::search::{Matching, TagScope, ToQuery};
    pub use crate::store::TagStore;
    pub use uuid::Uuid;
}
