mod input_layer;
pub use self::input_layer::*;

mod output_layer;
pub use self::output_layer::*;
