pub(crate) mod feed;
pub(crate) mod ingest;
pub(crate) mod serve;
