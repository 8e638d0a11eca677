mod block_all;

pub use block_all::BlockAll;
