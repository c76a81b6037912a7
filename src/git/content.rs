//! Direct content loading for the no-baseline display instructions

use std::path::Path;

use encoding_rs::Encoding;

use crate::encoding::decode_bytes;
use crate::error::{Result, SeadiffError};

/// Load a blob's content by object id, decoded with the given encoding
pub fn load_object_content(
    repo_path: &Path,
    object_id: &str,
    encoding: &'static Encoding,
) -> Result<String> {
    let repo = git2::Repository::open(repo_path)?;
    let oid = git2::Oid::from_str(object_id)?;
    let blob = repo.find_blob(oid)?;
    Ok(decode_bytes(blob.content(), encoding))
}

/// Load a path's content as of a specific revision
pub fn load_revision_content(
    repo_path: &Path,
    revision: &str,
    path: &str,
    encoding: &'static Encoding,
) -> Result<String> {
    let repo = git2::Repository::open(repo_path)?;
    let tree = repo.revparse_single(revision)?.peel_to_commit()?.tree()?;
    let entry = tree.get_path(Path::new(path)).map_err(|_| {
        SeadiffError::InvalidPath(format!("'{path}' not found in revision '{revision}'"))
    })?;
    let blob = repo.find_blob(entry.id())?;
    Ok(decode_bytes(blob.content(), encoding))
}
