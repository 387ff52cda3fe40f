use super::namespace_of;
use crate::ops::{with_binary_functions, with_unary_functions};
use crate::protocol::ArrayRef;
use crate::Result;

macro_rules! forward_unary {
    ($($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Elementwise `", stringify!($name), "` in the namespace of `x`.")]
            pub fn $name(x: &ArrayRef) -> Result<ArrayRef> {
                namespace_of(&[x])?.$name(x)
            }
        )+
    };
}

macro_rules! forward_binary {
    ($($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Elementwise `", stringify!($name), "` in the namespace shared by `x1` and `x2`.")]
            pub fn $name(x1: &ArrayRef, x2: &ArrayRef) -> Result<ArrayRef> {
                namespace_of(&[x1, x2])?.$name(x1, x2)
            }
        )+
    };
}

with_unary_functions!(forward_unary);
with_binary_functions!(forward_binary);
