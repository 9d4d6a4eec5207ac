//! Client for the z/OSMF REST files API (`/zosmf/restfiles/`).
//!
//! Every method maps to a single request; nothing is cached or retried.
//!
//! ```no_run
//! use zosmf_files::files::Files;
//! use zosmf_files::ZosmfConnection;
//!
//! let connection = ZosmfConnection::new("mf.example.com:443", "IBMUSER", "secret", true);
//! let files = Files::new(&connection)?;
//! for item in files.list_dsn("IBMUSER.*")?.items {
//!     println!("{}", item.dsname);
//! }
//! # Ok::<(), zosmf_files::ZosmfError>(())
//! ```

pub mod records;
mod types;

pub use types::{
    DatasetCreateParams, DatasetListItem, DatasetListResponse, MemberListItem, MemberListResponse,
};

use std::fs;
use std::path::Path;

use crate::api::{Method, RequestHandler, Transport, UreqTransport};
use crate::connection::ZosmfConnection;
use crate::error::ZosmfError;

/// Endpoint of the files API below the server URL.
pub const FILES_ENDPOINT: &str = "/zosmf/restfiles/";

/// Default `X-IBM-Max-Items` for member listings.
pub const DEFAULT_MEMBER_LIMIT: u32 = 1000;

const WRITE_EXPECTED: &[u16] = &[204, 201];

/// Dataset operations against one z/OSMF instance.
pub struct Files {
    handler: RequestHandler,
}

impl Files {
    /// Client using a `ureq` transport that honours the connection's SSL
    /// verification setting.
    pub fn new(connection: &ZosmfConnection) -> Result<Self, ZosmfError> {
        let transport = UreqTransport::new(connection.ssl_verification());
        Self::with_transport(connection, Box::new(transport))
    }

    pub fn with_transport(
        connection: &ZosmfConnection,
        transport: Box<dyn Transport>,
    ) -> Result<Self, ZosmfError> {
        Ok(Self {
            handler: RequestHandler::new(connection, FILES_ENDPOINT, transport)?,
        })
    }

    /// Lists datasets matching `name_pattern` (e.g. `IBMUSER.*`).
    pub fn list_dsn(&self, name_pattern: &str) -> Result<DatasetListResponse, ZosmfError> {
        let request = self
            .handler
            .request(Method::Get, &["ds"])
            .with_query("dslevel", name_pattern);
        self.handler.perform_json(&request)
    }

    /// Lists the members of a PDS/PDSE.
    ///
    /// `member_pattern` filters by name, `member_start` begins the listing
    /// after the given member, and `limit` caps the number of items returned.
    pub fn list_dsn_members(
        &self,
        dataset_name: &str,
        member_pattern: Option<&str>,
        member_start: Option<&str>,
        limit: u32,
    ) -> Result<Vec<MemberListItem>, ZosmfError> {
        let mut request = self
            .handler
            .request(Method::Get, &["ds", dataset_name, "member"])
            .with_header("X-IBM-Max-Items", limit.to_string());
        if let Some(start) = member_start {
            request = request.with_query("start", start);
        }
        if let Some(pattern) = member_pattern {
            request = request.with_query("pattern", pattern);
        }

        let response: MemberListResponse = self.handler.perform_json(&request)?;
        Ok(response.items)
    }

    /// Reads a dataset (or `PDS(MEMBER)`) as text.
    pub fn get_dsn_content(&self, dataset_name: &str) -> Result<String, ZosmfError> {
        let request = self.handler.request(Method::Get, &["ds", dataset_name]);
        Ok(self.handler.perform(&request, &[200])?.text())
    }

    /// Reads a dataset without codepage conversion.
    ///
    /// With `with_prefixes` each record is preceded by its length as a 4-byte
    /// big-endian integer; see [`records::split_record_prefixed`].
    pub fn get_dsn_binary_content(
        &self,
        dataset_name: &str,
        with_prefixes: bool,
    ) -> Result<Vec<u8>, ZosmfError> {
        let data_type = if with_prefixes { "record" } else { "binary" };
        let request = self
            .handler
            .request(Method::Get, &["ds", dataset_name])
            .with_header("Accept", "application/octet-stream")
            .with_header("X-IBM-Data-Type", data_type);
        Ok(self.handler.perform(&request, &[200])?.body)
    }

    /// Replaces the content of an existing dataset with `data`.
    pub fn write_to_dsn(&self, dataset_name: &str, data: &str) -> Result<(), ZosmfError> {
        let request = self
            .handler
            .request(Method::Put, &["ds", dataset_name])
            .with_header("Content-Type", "text/plain")
            .with_body(data);
        self.handler.perform(&request, WRITE_EXPECTED)?;
        Ok(())
    }

    /// Saves the text content of a dataset to `output_file`.
    pub fn download_dsn(&self, dataset_name: &str, output_file: &Path) -> Result<(), ZosmfError> {
        let content = self.get_dsn_content(dataset_name)?;
        fs::write(output_file, &content)?;
        tracing::info!(dataset = dataset_name, file = %output_file.display(), bytes = content.len(), "downloaded dataset");
        Ok(())
    }

    /// Saves the binary content of a dataset to `output_file`.
    pub fn download_binary_dsn(
        &self,
        dataset_name: &str,
        output_file: &Path,
        with_prefixes: bool,
    ) -> Result<(), ZosmfError> {
        let content = self.get_dsn_binary_content(dataset_name, with_prefixes)?;
        fs::write(output_file, &content)?;
        tracing::info!(dataset = dataset_name, file = %output_file.display(), bytes = content.len(), "downloaded binary dataset");
        Ok(())
    }

    /// Writes the text of a local file into a dataset.
    ///
    /// # Errors
    /// Returns [`ZosmfError::FileNotFound`] without contacting the server if
    /// `input_file` is not an existing file.
    pub fn upload_file_to_dsn(&self, input_file: &Path, dataset_name: &str) -> Result<(), ZosmfError> {
        if !input_file.is_file() {
            return Err(ZosmfError::FileNotFound(input_file.to_path_buf()));
        }

        let content = fs::read_to_string(input_file)?;
        self.write_to_dsn(dataset_name, &content)?;
        tracing::info!(dataset = dataset_name, file = %input_file.display(), bytes = content.len(), "uploaded file");
        Ok(())
    }

    /// Allocates a new dataset.
    pub fn create_dsn(&self, dataset_name: &str, params: &DatasetCreateParams) -> Result<(), ZosmfError> {
        let body = serde_json::to_vec(params).map_err(|source| ZosmfError::RequestEncode {
            url: self.handler.endpoint().to_string(),
            source,
        })?;
        let request = self
            .handler
            .request(Method::Post, &["ds", dataset_name])
            .with_body(body);
        self.handler.perform(&request, &[201])?;
        Ok(())
    }

    /// Deletes a dataset or a PDS member.
    pub fn delete_dsn(&self, dataset_name: &str) -> Result<(), ZosmfError> {
        let request = self.handler.request(Method::Delete, &["ds", dataset_name]);
        self.handler.perform(&request, &[204])?;
        Ok(())
    }
}
