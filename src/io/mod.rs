mod endian;
mod shared_stream;

pub use endian::EndianReader;
pub use shared_stream::SharedStream;
