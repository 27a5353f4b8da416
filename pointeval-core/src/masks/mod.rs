mod observation_mask;
pub use self::observation_mask::*;

mod plane;
pub use self::plane::*;
