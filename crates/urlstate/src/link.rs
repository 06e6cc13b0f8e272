use uniforms::{ParamPatch, ShaderParams};
use url::Url;

use crate::{decode, encode};

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("invalid link: {0}")]
    Parse(#[from] url::ParseError),
    #[error("'{0}' cannot carry shader state")]
    CannotBeABase(String),
}

/// Raw state string of a full link. The fragment wins over the query string.
pub fn link_state(link: &str) -> Result<String, LinkError> {
    let url = Url::parse(link.trim())?;
    let state = match url.fragment().filter(|fragment| !fragment.is_empty()) {
        Some(fragment) => fragment,
        None => url.query().unwrap_or_default(),
    };
    Ok(state.to_string())
}

/// `base` with `state` as its fragment.
pub fn link_with_state(base: &str, state: &str) -> Result<String, LinkError> {
    let mut url = Url::parse(base.trim())?;
    if url.cannot_be_a_base() {
        return Err(LinkError::CannotBeABase(base.to_string()));
    }
    url.set_fragment(Some(state));
    Ok(url.into())
}

pub fn decode_link<P: ShaderParams>(link: &str) -> Result<ParamPatch, LinkError> {
    link_state(link).map(|state| decode::<P>(&state))
}

/// `base` with the state of `params` in its fragment.
pub fn share_link<P: ShaderParams>(base: &str, params: &P) -> Result<String, LinkError> {
    link_with_state(base, &encode(params))
}
