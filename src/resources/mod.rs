//! Typed chunk bodies and the shared parse protocol they're built on.

pub mod dict;
pub mod generic;
pub mod imap;
pub mod list;
pub mod mmap;
pub mod resource;
pub mod xtra;

pub use dict::{BadDResource, DictResource};
pub use generic::GenericResource;
pub use imap::{DirectorVersion, IMapResource};
pub use list::ListResource;
pub use mmap::MMapResource;
pub use xtra::RIFFXtraFileResource;

/// The interpreted body of a resolved resource, selected by tag during
/// archive parsing.
#[derive(Debug)]
pub enum ResourceBody {
    Generic(GenericResource),
    IMap(IMapResource),
    MMap(MMapResource),
    Dict(DictResource),
    BadD(BadDResource),
    List(ListResource),
    Xtra(RIFFXtraFileResource),
    Archive(Box<crate::archive::Archive>),
}
