pub mod err_const;
pub mod fs_const;
pub mod sys_const;

pub use err_const::*;
pub use fs_const::*;
pub use sys_const::*;
