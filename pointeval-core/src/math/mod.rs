mod bounds;
pub use self::bounds::*;

mod arithmetic;
pub use self::arithmetic::*;
