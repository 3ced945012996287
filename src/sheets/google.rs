//! Google Sheets backend
//!
//! Talks to the Sheets v4 REST API directly:
//! - Drive v3 file search to open the spreadsheet by name
//! - `values` endpoints for reads, clears, updates and appends
//! - `batchUpdate` for worksheet creation and background colors

use super::{Color, ServiceAccountKey, SheetBackend};
use crate::domain::Row;
use crate::error::{AppError, SheetError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

/// Sheets API base URL
const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Drive API file listing URL
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// MIME type of native spreadsheets in Drive
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// Size of newly created worksheets
const NEW_SHEET_ROWS: u32 = 100;
const NEW_SHEET_COLUMNS: u32 = 10;

/// Drive file listing response
#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

/// Spreadsheet metadata response (`fields=sheets.properties`)
#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

/// `values.get` response
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Spreadsheet opened through the Google APIs
pub struct GoogleSheets {
    http: Client,
    token: String,
    spreadsheet_id: String,
}

impl GoogleSheets {
    /// Authenticate with the service account and open the spreadsheet named `name`
    pub async fn connect(
        name: &str,
        key: &ServiceAccountKey,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SheetError::request_failed("client", e.to_string()))?;
        let token = key.access_token(&http).await?;

        let mut sheets = Self {
            http,
            token,
            spreadsheet_id: String::new(),
        };
        sheets.spreadsheet_id = sheets.find_spreadsheet(name).await?;
        info!(spreadsheet = name, id = %sheets.spreadsheet_id, "opened spreadsheet");
        Ok(sheets)
    }

    /// Look the spreadsheet up by exact name in Drive
    async fn find_spreadsheet(&self, name: &str) -> Result<String, SheetError> {
        let query = drive_query(name);
        let request = self.http.get(DRIVE_FILES_URL).query(&[
            ("q", query.as_str()),
            ("fields", "files(id,name)"),
            ("supportsAllDrives", "true"),
            ("includeItemsFromAllDrives", "true"),
        ]);
        let list: DriveFileList = self.send_json("open", request).await?;

        list.files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| SheetError::SpreadsheetNotFound {
                name: name.to_string(),
            })
    }

    /// URL under the spreadsheet resource, e.g. `[":batchUpdate"]` or `["values", range]`
    fn endpoint(&self, suffix: &str, segments: &[&str]) -> Result<Url, SheetError> {
        let mut url = Url::parse(SHEETS_API_URL)
            .map_err(|e| SheetError::request_failed("url", e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SheetError::request_failed("url", "base URL cannot hold a path"))?
            .push(&format!("{}{}", self.spreadsheet_id, suffix))
            .extend(segments);
        Ok(url)
    }

    /// Send an authorized request and map error statuses
    async fn send(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, SheetError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| SheetError::request_failed(operation, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(SheetError::ApiError {
            operation: operation.to_string(),
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T, SheetError> {
        self.send(operation, request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| SheetError::invalid_response(operation, e.to_string()))
    }

    /// Worksheet ids and titles
    async fn sheet_properties(&self) -> Result<Vec<SheetProperties>, SheetError> {
        let url = self.endpoint("", &[])?;
        let request = self
            .http
            .get(url)
            .query(&[("fields", "sheets.properties(sheetId,title)")]);
        let meta: SpreadsheetMeta = self.send_json("metadata", request).await?;
        Ok(meta.sheets.into_iter().map(|s| s.properties).collect())
    }

    /// Numeric id of a worksheet, required by `batchUpdate` ranges
    async fn sheet_id(&self, title: &str) -> Result<i64, SheetError> {
        self.sheet_properties()
            .await?
            .into_iter()
            .find(|p| p.title == title)
            .map(|p| p.sheet_id)
            .ok_or_else(|| SheetError::worksheet_not_found(title))
    }

    async fn batch_update(&self, operation: &str, requests: Vec<Value>) -> Result<(), SheetError> {
        if requests.is_empty() {
            return Ok(());
        }
        let url = self.endpoint(":batchUpdate", &[])?;
        let request = self.http.post(url).json(&json!({ "requests": requests }));
        self.send(operation, request).await?;
        Ok(())
    }

    async fn get_values(&self, title: &str, range: &str) -> Result<Vec<Row>, SheetError> {
        let url = self.endpoint("", &["values", range])?;
        let result: Result<ValueRange, SheetError> =
            self.send_json("read", self.http.get(url)).await;
        match result {
            Ok(values) => Ok(values.values.into_iter().map(cells_to_row).collect()),
            // Sheets reports unknown worksheet titles as unparsable ranges
            Err(SheetError::ApiError {
                status, message, ..
            }) if status == StatusCode::BAD_REQUEST.as_u16()
                && message.contains("Unable to parse range") =>
            {
                Err(SheetError::worksheet_not_found(title))
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl SheetBackend for GoogleSheets {
    async fn worksheet_titles(&self) -> Result<Vec<String>, SheetError> {
        Ok(self
            .sheet_properties()
            .await?
            .into_iter()
            .map(|p| p.title)
            .collect())
    }

    async fn read_all(&self, title: &str) -> Result<Vec<Row>, SheetError> {
        self.get_values(title, &quote_title(title)).await
    }

    async fn read_row(&self, title: &str, row: usize) -> Result<Row, SheetError> {
        let range = format!("{}!{}:{}", quote_title(title), row, row);
        Ok(self
            .get_values(title, &range)
            .await?
            .into_iter()
            .next()
            .unwrap_or_default())
    }

    async fn clear(&self, title: &str) -> Result<(), SheetError> {
        let url = self.endpoint("", &["values", &format!("{}:clear", quote_title(title))])?;
        self.send("clear", self.http.post(url).json(&json!({})))
            .await?;
        debug!(worksheet = title, "cleared");
        Ok(())
    }

    async fn write_rows(
        &self,
        title: &str,
        start_row: usize,
        rows: &[Row],
    ) -> Result<(), SheetError> {
        let range = format!("{}!A{}", quote_title(title), start_row);
        let url = self.endpoint("", &["values", &range])?;
        let request = self
            .http
            .put(url)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "majorDimension": "ROWS", "values": rows }));
        self.send("update", request).await?;
        debug!(worksheet = title, rows = rows.len(), "wrote rows");
        Ok(())
    }

    async fn append_rows(&self, title: &str, rows: &[Row]) -> Result<(), SheetError> {
        let range = format!("{}!A1", quote_title(title));
        let url = self.endpoint("", &["values", &format!("{}:append", range)])?;
        let request = self
            .http
            .post(url)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "majorDimension": "ROWS", "values": rows }));
        self.send("append", request).await?;
        debug!(worksheet = title, rows = rows.len(), "appended rows");
        Ok(())
    }

    async fn ensure_worksheet(&self, title: &str) -> Result<bool, SheetError> {
        if self.worksheet_titles().await?.iter().any(|t| t == title) {
            return Ok(false);
        }
        self.batch_update("add worksheet", vec![add_sheet_request(title)])
            .await?;
        info!(worksheet = title, "created worksheet");
        Ok(true)
    }

    async fn highlight_rows(
        &self,
        title: &str,
        rows: &[usize],
        columns: usize,
        color: Color,
    ) -> Result<(), SheetError> {
        if rows.is_empty() {
            return Ok(());
        }
        let sheet_id = self.sheet_id(title).await?;
        let requests = rows
            .iter()
            .map(|&row| highlight_request(sheet_id, row, columns, color))
            .collect();
        self.batch_update("highlight", requests).await
    }

    async fn reset_backgrounds(&self, title: &str) -> Result<(), SheetError> {
        let sheet_id = self.sheet_id(title).await?;
        let request = json!({
            "repeatCell": {
                "range": { "sheetId": sheet_id },
                "cell": { "userEnteredFormat": {} },
                "fields": "userEnteredFormat.backgroundColor"
            }
        });
        self.batch_update("reset backgrounds", vec![request]).await
    }
}

/// Quote a worksheet title for A1 notation (`It's` → `'It''s'`)
fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Drive search expression matching a spreadsheet by exact name
fn drive_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escaped, SPREADSHEET_MIME
    )
}

/// Convert API cell values into strings
fn cells_to_row(cells: Vec<Value>) -> Row {
    cells
        .into_iter()
        .map(|cell| match cell {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect()
}

fn add_sheet_request(title: &str) -> Value {
    json!({
        "addSheet": {
            "properties": {
                "title": title,
                "gridProperties": {
                    "rowCount": NEW_SHEET_ROWS,
                    "columnCount": NEW_SHEET_COLUMNS
                }
            }
        }
    })
}

/// Background fill for columns `A..` of a 1-based row
fn highlight_request(sheet_id: i64, row: usize, columns: usize, color: Color) -> Value {
    json!({
        "repeatCell": {
            "range": {
                "sheetId": sheet_id,
                "startRowIndex": row.saturating_sub(1),
                "endRowIndex": row,
                "startColumnIndex": 0,
                "endColumnIndex": columns
            },
            "cell": {
                "userEnteredFormat": {
                    "backgroundColor": {
                        "red": color.red,
                        "green": color.green,
                        "blue": color.blue
                    }
                }
            },
            "fields": "userEnteredFormat.backgroundColor"
        }
    })
}
