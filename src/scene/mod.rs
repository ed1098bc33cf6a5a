//! The scene-graph state this crate consumes. The renderer never owns any of
//! these values: the embedding scene graph passes them in per frame or per
//! query.

mod bounds;
mod costume;
mod effects;
mod sprite;

pub use self::bounds::*;
pub use self::costume::*;
pub use self::effects::*;
pub use self::sprite::*;
