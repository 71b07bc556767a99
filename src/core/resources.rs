use std::collections::BTreeSet;
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellMcpError};

/// UI fragment rendered by hosts for the `run-shell-command` tool.
pub const RUN_SHELL_COMMAND_URI: &str = "ui://run-shell-command/run-shell-command-app.html";

/// URIs vetted for the rich response path. Everything else gets the fallback item.
pub const SPECIAL_URIS: &[&str] = &[RUN_SHELL_COMMAND_URI];

pub const APP_HTML_MIME: &str = "text/html;profile=mcp-app";
pub const PLAIN_TEXT_MIME: &str = "text/plain";
pub const NOT_FOUND_TEXT: &str = "Resource not found";

/// External origins the served HTML may load assets from.
pub const RESOURCE_DOMAINS: &[&str] = &["https://unpkg.com"];

/// Routing decision for a resource read, keyed purely on set membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Special,
    Fallback,
}

/// Raw file contents; text unless the file is not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceBody {
    Text(String),
    Binary(Vec<u8>),
}

/// Maps resource URIs to files under a base directory. Rereads on every call.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    base_dir: PathBuf,
    special: BTreeSet<String>,
}

impl ResourceStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_special_uris(base_dir, SPECIAL_URIS.iter().copied())
    }

    pub fn with_special_uris<I, S>(base_dir: impl Into<PathBuf>, uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_dir: base_dir.into(),
            special: uris.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, uri: &str) -> Classification {
        if self.special.contains(uri) {
            Classification::Special
        } else {
            Classification::Fallback
        }
    }

    pub fn special_uris(&self) -> impl Iterator<Item = &str> {
        self.special.iter().map(String::as_str)
    }

    /// File backing `uri`: its final path segment, resolved against the base dir.
    pub fn path_for(&self, uri: &str) -> PathBuf {
        self.base_dir.join(file_name(uri))
    }

    pub fn read(&self, uri: &str) -> Result<ResourceBody> {
        let path = self.path_for(uri);
        let bytes = std::fs::read(&path).map_err(|source| ShellMcpError::ResourceRead {
            uri: uri.to_string(),
            path: path.clone(),
            source,
        })?;

        Ok(match String::from_utf8(bytes) {
            Ok(text) => ResourceBody::Text(text),
            Err(e) => ResourceBody::Binary(e.into_bytes()),
        })
    }
}

/// Substring after the final `/`, or the whole URI when there is none.
pub fn file_name(uri: &str) -> &str {
    uri.rsplit_once('/').map_or(uri, |(_, name)| name)
}

/// One item of a resource-read response, in wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceContents {
    Text(TextContents),
    Blob(BlobContents),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<UiMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobContents {
    pub uri: String,
    pub mime_type: String,
    /// Base64 of the file bytes.
    pub blob: String,
}

/// Display and embedding hints attached to vetted UI resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiMeta {
    pub ui: UiHints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiHints {
    pub csp: CspHints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CspHints {
    pub resource_domains: Vec<String>,
}

impl UiMeta {
    pub fn with_resource_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ui: UiHints {
                csp: CspHints {
                    resource_domains: domains.into_iter().map(Into::into).collect(),
                },
            },
        }
    }
}

impl Default for UiMeta {
    fn default() -> Self {
        Self::with_resource_domains(RESOURCE_DOMAINS.iter().copied())
    }
}

impl ResourceContents {
    /// Rich item for a vetted URI.
    pub fn app(uri: &str, body: ResourceBody, meta: UiMeta) -> Self {
        match body {
            ResourceBody::Text(text) => Self::Text(TextContents {
                uri: uri.to_string(),
                mime_type: APP_HTML_MIME.into(),
                text,
                meta: Some(meta),
            }),
            ResourceBody::Binary(bytes) => Self::Blob(BlobContents {
                uri: uri.to_string(),
                mime_type: APP_HTML_MIME.into(),
                blob: STANDARD.encode(bytes),
            }),
        }
    }

    /// Inert item returned for every URI outside the vetted set.
    pub fn not_found(uri: &str) -> Self {
        Self::Text(TextContents {
            uri: uri.to_string(),
            mime_type: PLAIN_TEXT_MIME.into(),
            text: NOT_FOUND_TEXT.into(),
            meta: None,
        })
    }

    pub fn uri(&self) -> &str {
        match self {
            Self::Text(t) => &t.uri,
            Self::Blob(b) => &b.uri,
        }
    }

    pub fn mime_type(&self) -> &str {
        match self {
            Self::Text(t) => &t.mime_type,
            Self::Blob(b) => &b.mime_type,
        }
    }
}
