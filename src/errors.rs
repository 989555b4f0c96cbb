use failure::Fail;

use crate::scene::NodeRef;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "No node labelled '{}' in document '{}'.", label, document)]
    MissingIdentity { label: String, document: String },
    #[fail(display = "Document '{}' does not exist.", _0)]
    UnknownDocument(String),
    #[fail(display = "Document '{}' already exists.", _0)]
    DuplicateDocument(String),
    #[fail(display = "{} does not refer to a node.", _0)]
    DanglingReference(NodeRef),
    #[fail(display = "{} is not an assembly container.", _0)]
    NotAContainer(NodeRef),
    #[fail(display = "{} is already owned by {}.", child, owner)]
    AlreadyOwned { child: NodeRef, owner: NodeRef },
    #[fail(display = "{} can not own {} of another document.", container, child)]
    ForeignChild { container: NodeRef, child: NodeRef },
    #[fail(display = "{} can not own itself.", _0)]
    CanNotOwnSelf(NodeRef),
    #[fail(display = "Cyclic reference through {}.", _0)]
    CyclicReference(NodeRef),
    #[fail(display = "Documents depend on each other cyclically: {}.", _0)]
    CyclicDocuments(String),
    #[fail(
        display = "Correcting '{}' by {} would make its count ({}) negative.",
        label, correction, raw
    )]
    NegativeCount {
        label: String,
        raw: usize,
        correction: usize,
    },
    #[fail(
        display = "Multiplying the count of '{}' ({}) by {} overflows.",
        label, raw, factor
    )]
    CountOverflow {
        label: String,
        raw: usize,
        factor: u32,
    },
    #[fail(display = "A rotor has 1 or 2 disks, not {}.", _0)]
    InvalidTopology(u32),
    #[fail(display = "Invalid scene description: {}.", _0)]
    InvalidDescription(String),
    #[fail(display = "{}", _0)]
    Json(#[cause] serde_json::Error),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
