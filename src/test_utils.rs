#[cfg(test)]
pub mod test_utils {
    use crate::api_client::AccountingApi;
    use crate::error::ApiError;
    use async_trait::async_trait;
    use axum::extract::{Multipart, Path, Query, State};
    use axum::http::{StatusCode, header};
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use common::{AccountDto, AccountType, CreateJournalEntryRequest, JournalEntryCreated};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// How the fake backend answers `POST /api/journal-entries`.
    #[derive(Debug, Clone)]
    pub enum JournalReply {
        Created { entry_id: i64 },
        /// 2xx with only a `message`, no id and no `error`.
        Acknowledged(String),
        /// `{error}` body with the given status
        Rejected { status: StatusCode, message: String },
        /// Non-JSON body with the given status
        Garbage(StatusCode),
        /// Answers only after the delay
        Stall(Duration),
    }

    #[derive(Debug)]
    struct FakeState {
        journal_reply: Mutex<JournalReply>,
        journal_entries: Mutex<Vec<Value>>,
        created_accounts: Mutex<Vec<Value>>,
        uploads: Mutex<Vec<HashMap<String, String>>>,
        account_listings: AtomicUsize,
        requests: AtomicUsize,
        queries: Mutex<Vec<HashMap<String, String>>>,
    }

    /// In-process accounting backend speaking the same JSON as the real one.
    #[derive(Debug, Clone)]
    pub struct FakeBackend {
        state: Arc<FakeState>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self {
                state: Arc::new(FakeState {
                    journal_reply: Mutex::new(JournalReply::Created { entry_id: 1 }),
                    journal_entries: Mutex::new(Vec::new()),
                    created_accounts: Mutex::new(Vec::new()),
                    uploads: Mutex::new(Vec::new()),
                    account_listings: AtomicUsize::new(0),
                    requests: AtomicUsize::new(0),
                    queries: Mutex::new(Vec::new()),
                }),
            }
        }

        pub fn reply_to_journal_entries_with(&self, reply: JournalReply) {
            *self.state.journal_reply.lock().unwrap() = reply;
        }

        /// Bodies received on `POST /api/journal-entries`.
        pub fn journal_entries(&self) -> Vec<Value> {
            self.state.journal_entries.lock().unwrap().clone()
        }

        pub fn created_accounts(&self) -> Vec<Value> {
            self.state.created_accounts.lock().unwrap().clone()
        }

        /// Text fields and file names of every multipart upload.
        pub fn uploads(&self) -> Vec<HashMap<String, String>> {
            self.state.uploads.lock().unwrap().clone()
        }

        pub fn queries(&self) -> Vec<HashMap<String, String>> {
            self.state.queries.lock().unwrap().clone()
        }

        pub fn account_listings(&self) -> usize {
            self.state.account_listings.load(Ordering::SeqCst)
        }

        /// Total number of requests served.
        pub fn requests(&self) -> usize {
            self.state.requests.load(Ordering::SeqCst)
        }

        fn hit(&self) {
            self.state.requests.fetch_add(1, Ordering::SeqCst);
        }

        pub fn router(&self) -> Router {
            Router::new()
                .route("/api/accounts", get(list_accounts).post(create_account))
                .route("/api/accounts/:code", get(get_account))
                .route("/api/journal-entries", post(create_journal_entry))
                .route("/api/fiscal-years", get(list_fiscal_years).post(create_fiscal_year))
                .route("/api/fiscal-years/:id/close", post(close_fiscal_year))
                .route("/api/reports", get(list_reports).post(generate_report))
                .route("/api/reports/:id/download", get(download_report))
                .route("/api/contracts/upload", post(upload_contract))
                .route("/api/documents/merge", post(merge_documents))
                .route("/api/excel/accounting/download", get(missing_template))
                .route("/api/card-statements", get(list_card_statements))
                .route("/api/card-statements/process", post(process_card_expenses))
                .with_state(self.clone())
        }

        /// Serves the backend on an ephemeral local port and returns its base URL.
        pub async fn spawn(&self) -> String {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind fake backend");
            let addr = listener.local_addr().expect("Fake backend has no address");
            let router = self.router();
            tokio::spawn(async move {
                axum::serve(listener, router).await.expect("Fake backend stopped");
            });
            format!("http://{}", addr)
        }
    }

    pub fn account_catalog() -> Vec<Value> {
        vec![
            json!({"id": 1, "code": "1010", "name": "Cash", "type": "ASSET", "description": "Cash on hand"}),
            json!({"id": 2, "code": "4010", "name": "Sales", "type": "REVENUE", "description": null}),
            json!({"id": 3, "code": "5010", "name": "Rent", "type": "EXPENSE", "description": "Office rent"}),
        ]
    }

    async fn list_accounts(State(backend): State<FakeBackend>) -> Json<Value> {
        backend.hit();
        backend.state.account_listings.fetch_add(1, Ordering::SeqCst);
        Json(Value::Array(account_catalog()))
    }

    async fn create_account(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
        backend.hit();
        backend.state.created_accounts.lock().unwrap().push(body.clone());
        let reply = json!({
            "account_id": 10,
            "code": body["code"],
            "name": body["name"],
            "type": body["type"],
            "description": body["description"],
        });
        (StatusCode::CREATED, Json(reply)).into_response()
    }

    async fn get_account(State(backend): State<FakeBackend>, Path(code): Path<String>) -> Response {
        backend.hit();
        match account_catalog().into_iter().find(|a| a["code"] == code.as_str()) {
            Some(account) => Json(account).into_response(),
            None => (StatusCode::NOT_FOUND, Json(json!({"error": "account not found"}))).into_response(),
        }
    }

    async fn create_journal_entry(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
        backend.hit();
        backend.state.journal_entries.lock().unwrap().push(body);
        let reply = backend.state.journal_reply.lock().unwrap().clone();
        match reply {
            JournalReply::Created { entry_id } => (
                StatusCode::CREATED,
                Json(json!({"message": "Journal entry created", "entry_id": entry_id})),
            )
                .into_response(),
            JournalReply::Acknowledged(message) => (StatusCode::OK, Json(json!({"message": message}))).into_response(),
            JournalReply::Rejected { status, message } => (status, Json(json!({"error": message}))).into_response(),
            JournalReply::Garbage(status) => (status, "<html>upstream failure</html>").into_response(),
            JournalReply::Stall(delay) => {
                tokio::time::sleep(delay).await;
                (StatusCode::CREATED, Json(json!({"entry_id": 99}))).into_response()
            }
        }
    }

    async fn list_fiscal_years(State(backend): State<FakeBackend>) -> Json<Value> {
        backend.hit();
        Json(json!([
            {"id": 1, "year": 2023, "start_date": "2023-01-01T00:00:00", "end_date": "2023-12-31T00:00:00", "is_closed": true},
            {"id": 2, "year": 2024, "start_date": "2024-01-01T00:00:00", "end_date": "2024-12-31T00:00:00", "is_closed": false}
        ]))
    }

    async fn create_fiscal_year(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
        backend.hit();
        let year = body["year"].as_i64().unwrap_or_default();
        (
            StatusCode::CREATED,
            Json(json!({
                "fiscal_year_id": 3,
                "year": year,
                "start_date": format!("{year}-01-01T00:00:00"),
                "end_date": format!("{year}-12-31T00:00:00"),
            })),
        )
            .into_response()
    }

    async fn close_fiscal_year(
        State(backend): State<FakeBackend>,
        Path(id): Path<i64>,
        Json(body): Json<Value>,
    ) -> Response {
        backend.hit();
        if id != 2 {
            return (StatusCode::NOT_FOUND, Json(json!({"error": "fiscal year not found"}))).into_response();
        }
        Json(json!({
            "fiscal_year_id": id,
            "year": 2024,
            "closed_at": "2025-01-05T09:30:00.123456",
            "closed_by": body["closed_by"],
        }))
        .into_response()
    }

    async fn list_reports(State(backend): State<FakeBackend>) -> Json<Value> {
        backend.hit();
        Json(json!([{
            "id": 1,
            "report_type": "BUDGET_VS_ACTUAL",
            "period_start": "2024-01-01",
            "period_end": "2024-03-31",
            "created_at": "2024-04-05T10:00:00",
            "file_path": "reports/budget_vs_actual_q1_2024.pdf"
        }]))
    }

    async fn generate_report(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
        backend.hit();
        (
            StatusCode::CREATED,
            Json(json!({
                "message": "Report generated",
                "report": {
                    "id": 5,
                    "fiscal_year_id": body["fiscal_year_id"],
                    "report_type": body["report_type"],
                    "period_start": body["period_start"],
                    "period_end": body["period_end"],
                    "created_at": "2024-04-05T10:00:00.5",
                    "file_path": "reports/sample_report.pdf"
                }
            })),
        )
            .into_response()
    }

    async fn download_report(State(backend): State<FakeBackend>, Path(id): Path<i64>) -> Response {
        backend.hit();
        (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"report_{id}.pdf\""),
                ),
            ],
            b"%PDF-1.4".to_vec(),
        )
            .into_response()
    }

    async fn upload_contract(State(backend): State<FakeBackend>, mut multipart: Multipart) -> Response {
        backend.hit();
        let mut fields = HashMap::new();
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            if let Some(file_name) = field.file_name() {
                fields.insert("file_name".to_string(), file_name.to_string());
            }
            let text = field.text().await.unwrap_or_default();
            fields.insert(name, text);
        }
        let reply = json!({
            "message": "Contract uploaded",
            "contract": {
                "id": 7,
                "name": fields.get("name").cloned().unwrap_or_default(),
                "description": fields.get("description").cloned(),
                "file_path": format!("contracts/{}", fields.get("file_name").cloned().unwrap_or_default()),
                "created_at": "2024-04-01T09:00:00"
            }
        });
        backend.state.uploads.lock().unwrap().push(fields);
        (StatusCode::CREATED, Json(reply)).into_response()
    }

    async fn merge_documents(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
        backend.hit();
        (
            StatusCode::CREATED,
            Json(json!({
                "message": "Documents merged",
                "document": {
                    "id": 3,
                    "type": "OTHER",
                    "name": body["name"],
                    "description": "Merged document",
                    "file_path": "documents/merged_document.pdf",
                    "source_documents": body["document_ids"],
                    "created_at": "2024-04-03T12:00:00"
                }
            })),
        )
            .into_response()
    }

    async fn missing_template(State(backend): State<FakeBackend>) -> Response {
        backend.hit();
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "template missing"})),
        )
            .into_response()
    }

    async fn list_card_statements(
        State(backend): State<FakeBackend>,
        Query(query): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        backend.hit();
        backend.state.queries.lock().unwrap().push(query);
        Json(json!([
            {
                "id": 1,
                "card_company": "shinhan",
                "card_number": "9410123456781234",
                "transaction_date": "2024-03-02T00:00:00",
                "merchant_name": "Coffee shop",
                "amount": 13500,
                "approval_number": "2403020001",
                "process_status": "UNPROCESSED"
            },
            {
                "id": 2,
                "card_company": "samsung",
                "card_number": "9410-****-****-1234",
                "transaction_date": "2024-03-04T00:00:00",
                "merchant_name": "Bookstore",
                "amount": 22000,
                "approval_number": "2403040002",
                "process_status": "PROCESSED"
            }
        ]))
    }

    async fn process_card_expenses(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Json<Value> {
        backend.hit();
        let count = body["statement_ids"].as_array().map(Vec::len).unwrap_or_default();
        Json(json!({"message": "Card expenses processed", "processed_count": count}))
    }

    /// `AccountingApi` double that never touches the network and counts calls.
    #[derive(Debug)]
    pub struct CountingApi {
        accounts: Vec<AccountDto>,
        rejection: Option<String>,
        creates: AtomicUsize,
        listings: AtomicUsize,
    }

    impl CountingApi {
        pub fn new() -> Self {
            Self {
                accounts: vec![account(1, "1010", AccountType::Asset), account(2, "4010", AccountType::Revenue)],
                rejection: None,
                creates: AtomicUsize::new(0),
                listings: AtomicUsize::new(0),
            }
        }

        /// Rejects every journal entry with `message`.
        pub fn rejecting(message: &str) -> Self {
            Self {
                rejection: Some(message.to_string()),
                ..Self::new()
            }
        }

        pub fn creates(&self) -> usize {
            self.creates.load(Ordering::SeqCst)
        }

        pub fn listings(&self) -> usize {
            self.listings.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AccountingApi for CountingApi {
        async fn list_accounts(&self) -> Result<Vec<AccountDto>, ApiError> {
            self.listings.fetch_add(1, Ordering::SeqCst);
            Ok(self.accounts.clone())
        }

        async fn create_journal_entry(
            &self,
            _request: &CreateJournalEntryRequest,
        ) -> Result<JournalEntryCreated, ApiError> {
            let count = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
            match &self.rejection {
                Some(message) => Err(ApiError::Server(message.clone())),
                None => Ok(JournalEntryCreated {
                    message: None,
                    entry_id: Some(count as i64),
                }),
            }
        }
    }

    pub fn account(id: i64, code: &str, account_type: AccountType) -> AccountDto {
        AccountDto {
            id,
            code: code.to_string(),
            name: format!("Account {}", code),
            account_type,
            description: None,
            parent_id: None,
            is_active: Some(true),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}
