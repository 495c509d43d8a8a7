// src/api_client.rs
//
// Contraparte em biblioteca dos hooks de dados do frontend: um cliente
// HTTP tipado para esta mesma API. Listagens passam por um TtlCache e
// mutações invalidam a chave da entidade correspondente.

pub mod cache;

use std::sync::Mutex;
use std::time::Duration;

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    common::response::Paginated,
    models::{
        appointment::{Appointment, AppointmentStatus},
        case::Case,
        client::{Client, ClientStatus},
        invoice::{Invoice, InvoiceStatus},
        notification::NotificationList,
        task::Task,
        team_member::TeamMember,
    },
};

use cache::TtlCache;

const CACHE_TTL: Duration = Duration::from_secs(30);

// Primeira carga de clientes tolera instabilidade: algumas tentativas com
// atraso fixo antes de desistir.
const LIST_RETRY_ATTEMPTS: u32 = 3;
const LIST_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("falha de transporte: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("o servidor respondeu {status}: {message}")]
    Api { status: u16, message: String },

    #[error("resposta em formato inesperado: {0}")]
    Decode(#[from] serde_json::Error),
}

// Aceita tanto o envelope {success, message, data} quanto um corpo cru,
// devolvendo só a carga útil.
fn normalize_envelope(status: u16, body: Value) -> Result<Value, ApiClientError> {
    if let Value::Object(map) = &body {
        if let Some(success) = map.get("success").and_then(Value::as_bool) {
            if !success {
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("erro desconhecido")
                    .to_string();
                return Err(ApiClientError::Api { status, message });
            }
            return Ok(map.get("data").cloned().unwrap_or(Value::Null));
        }
    }

    if status >= 400 {
        return Err(ApiClientError::Api {
            status,
            message: body.to_string(),
        });
    }

    Ok(body)
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    cache: Mutex<TtlCache>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
            cache: Mutex::new(TtlCache::new(CACHE_TTL)),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn clients(&self) -> ClientsApi<'_> {
        ClientsApi { api: self }
    }

    pub fn cases(&self) -> CasesApi<'_> {
        CasesApi { api: self }
    }

    pub fn invoices(&self) -> InvoicesApi<'_> {
        InvoicesApi { api: self }
    }

    pub fn appointments(&self) -> AppointmentsApi<'_> {
        AppointmentsApi { api: self }
    }

    pub fn team_members(&self) -> TeamMembersApi<'_> {
        TeamMembersApi { api: self }
    }

    pub fn tasks(&self) -> TasksApi<'_> {
        TasksApi { api: self }
    }

    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi { api: self }
    }

    async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let payload: Value = response.json().await?;
        let data = normalize_envelope(status, payload)?;

        Ok(serde_json::from_value(data)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        self.send::<T, Value>(Method::GET, path, None).await
    }

    fn cache_get(&self, key: &str) -> Option<Value> {
        self.cache.lock().ok()?.get(key)
    }

    fn cache_put(&self, key: &str, value: Value) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, value);
        }
    }

    fn invalidate(&self, key: &str) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.invalidate(key);
        }
    }

    // Listagem com cache: tenta a cópia local, senão busca e guarda
    async fn cached_list<T>(&self, key: &str, path: &str) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(cached) = self.cache_get(key) {
            return Ok(serde_json::from_value(cached)?);
        }

        let fresh: T = self.get_json(path).await?;
        self.cache_put(key, serde_json::to_value(&fresh)?);
        Ok(fresh)
    }
}

pub struct ClientsApi<'a> {
    api: &'a ApiClient,
}

impl ClientsApi<'_> {
    // Carga inicial: falha de transporte é retentada com atraso fixo
    pub async fn list(&self) -> Result<Paginated<Client>, ApiClientError> {
        if let Some(cached) = self.api.cache_get("clients") {
            return Ok(serde_json::from_value(cached)?);
        }

        let mut attempt = 1;
        loop {
            match self.api.get_json::<Paginated<Client>>("/api/clients").await {
                Ok(page) => {
                    self.api.cache_put("clients", serde_json::to_value(&page)?);
                    return Ok(page);
                }
                Err(err) => {
                    let retryable = matches!(err, ApiClientError::Transport(_));
                    if !retryable || attempt >= LIST_RETRY_ATTEMPTS {
                        return Err(err);
                    }
                    tracing::warn!(
                        "Falha ao listar clientes ({}ª de {} tentativas): {}",
                        attempt,
                        LIST_RETRY_ATTEMPTS,
                        err
                    );
                    tokio::time::sleep(LIST_RETRY_DELAY).await;
                    attempt += 1;
                }
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Client, ApiClientError> {
        self.api.get_json(&format!("/api/clients/{}", id)).await
    }

    pub async fn status(&self, id: Uuid) -> Result<ClientStatus, ApiClientError> {
        self.api
            .get_json(&format!("/api/clients/{}/status", id))
            .await
    }

    pub async fn create<B: Serialize>(&self, payload: &B) -> Result<Client, ApiClientError> {
        let client = self
            .api
            .send(Method::POST, "/api/clients", Some(payload))
            .await?;
        self.api.invalidate("clients");
        Ok(client)
    }

    pub async fn update<B: Serialize>(
        &self,
        id: Uuid,
        payload: &B,
    ) -> Result<Client, ApiClientError> {
        let client = self
            .api
            .send(Method::PUT, &format!("/api/clients/{}", id), Some(payload))
            .await?;
        self.api.invalidate("clients");
        Ok(client)
    }

    pub async fn delete(&self, id: Uuid, hard: bool) -> Result<(), ApiClientError> {
        let path = if hard {
            format!("/api/clients/{}?hard=true", id)
        } else {
            format!("/api/clients/{}", id)
        };
        let _: Value = self.api.send::<_, Value>(Method::DELETE, &path, None).await?;
        self.api.invalidate("clients");
        Ok(())
    }
}

pub struct CasesApi<'a> {
    api: &'a ApiClient,
}

impl CasesApi<'_> {
    pub async fn list(&self) -> Result<Paginated<Case>, ApiClientError> {
        self.api.cached_list("cases", "/api/cases").await
    }

    pub async fn get(&self, id: Uuid) -> Result<Case, ApiClientError> {
        self.api.get_json(&format!("/api/cases/{}", id)).await
    }

    pub async fn create<B: Serialize>(&self, payload: &B) -> Result<Case, ApiClientError> {
        let case = self
            .api
            .send(Method::POST, "/api/cases", Some(payload))
            .await?;
        self.api.invalidate("cases");
        Ok(case)
    }

    pub async fn update<B: Serialize>(
        &self,
        id: Uuid,
        payload: &B,
    ) -> Result<Case, ApiClientError> {
        let case = self
            .api
            .send(Method::PUT, &format!("/api/cases/{}", id), Some(payload))
            .await?;
        self.api.invalidate("cases");
        Ok(case)
    }

    pub async fn add_document(
        &self,
        id: Uuid,
        title: &str,
        url: &str,
    ) -> Result<Case, ApiClientError> {
        let case = self
            .api
            .send(
                Method::POST,
                &format!("/api/cases/{}/documents", id),
                Some(&json!({ "title": title, "url": url })),
            )
            .await?;
        self.api.invalidate("cases");
        Ok(case)
    }

    pub async fn archive(&self, id: Uuid) -> Result<(), ApiClientError> {
        let _: Value = self
            .api
            .send::<_, Value>(Method::DELETE, &format!("/api/cases/{}", id), None)
            .await?;
        self.api.invalidate("cases");
        Ok(())
    }
}

pub struct InvoicesApi<'a> {
    api: &'a ApiClient,
}

impl InvoicesApi<'_> {
    pub async fn list(&self) -> Result<Vec<Invoice>, ApiClientError> {
        self.api.cached_list("invoices", "/api/invoices").await
    }

    pub async fn get(&self, id: Uuid) -> Result<Invoice, ApiClientError> {
        self.api.get_json(&format!("/api/invoices/{}", id)).await
    }

    pub async fn by_client(&self, client_id: Uuid) -> Result<Vec<Invoice>, ApiClientError> {
        self.api
            .get_json(&format!("/api/invoices/client/{}", client_id))
            .await
    }

    pub async fn create<B: Serialize>(&self, payload: &B) -> Result<Invoice, ApiClientError> {
        let invoice = self
            .api
            .send(Method::POST, "/api/invoices", Some(payload))
            .await?;
        self.api.invalidate("invoices");
        Ok(invoice)
    }

    pub async fn update<B: Serialize>(
        &self,
        id: Uuid,
        payload: &B,
    ) -> Result<Invoice, ApiClientError> {
        let invoice = self
            .api
            .send(Method::PUT, &format!("/api/invoices/{}", id), Some(payload))
            .await?;
        self.api.invalidate("invoices");
        Ok(invoice)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiClientError> {
        let _: Value = self
            .api
            .send::<_, Value>(Method::DELETE, &format!("/api/invoices/{}", id), None)
            .await?;
        self.api.invalidate("invoices");
        Ok(())
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: InvoiceStatus,
    ) -> Result<Invoice, ApiClientError> {
        let invoice = self
            .api
            .send(
                Method::PATCH,
                &format!("/api/invoices/{}/status", id),
                Some(&json!({ "status": status })),
            )
            .await?;
        self.api.invalidate("invoices");
        Ok(invoice)
    }

    pub async fn mark_viewed(&self, id: Uuid) -> Result<Invoice, ApiClientError> {
        let invoice = self
            .api
            .send::<_, Value>(Method::PATCH, &format!("/api/invoices/{}/mark-viewed", id), None)
            .await?;
        self.api.invalidate("invoices");
        Ok(invoice)
    }

    pub async fn record_payment(
        &self,
        id: Uuid,
        amount: Decimal,
    ) -> Result<Invoice, ApiClientError> {
        let invoice = self
            .api
            .send(
                Method::POST,
                &format!("/api/invoices/{}/payments", id),
                Some(&json!({ "amount": amount })),
            )
            .await?;
        self.api.invalidate("invoices");
        Ok(invoice)
    }
}

pub struct AppointmentsApi<'a> {
    api: &'a ApiClient,
}

impl AppointmentsApi<'_> {
    pub async fn list(&self) -> Result<Vec<Appointment>, ApiClientError> {
        self.api
            .cached_list("appointments", "/api/appointments")
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Appointment, ApiClientError> {
        self.api
            .get_json(&format!("/api/appointments/{}", id))
            .await
    }

    pub async fn create<B: Serialize>(&self, payload: &B) -> Result<Appointment, ApiClientError> {
        let appointment = self
            .api
            .send(Method::POST, "/api/appointments", Some(payload))
            .await?;
        self.api.invalidate("appointments");
        Ok(appointment)
    }

    pub async fn update<B: Serialize>(
        &self,
        id: Uuid,
        payload: &B,
    ) -> Result<Appointment, ApiClientError> {
        let appointment = self
            .api
            .send(
                Method::PUT,
                &format!("/api/appointments/{}", id),
                Some(payload),
            )
            .await?;
        self.api.invalidate("appointments");
        Ok(appointment)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiClientError> {
        let appointment = self
            .api
            .send(
                Method::PATCH,
                &format!("/api/appointments/{}/status", id),
                Some(&json!({ "status": status })),
            )
            .await?;
        self.api.invalidate("appointments");
        Ok(appointment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiClientError> {
        let _: Value = self
            .api
            .send::<_, Value>(Method::DELETE, &format!("/api/appointments/{}", id), None)
            .await?;
        self.api.invalidate("appointments");
        Ok(())
    }
}

pub struct TeamMembersApi<'a> {
    api: &'a ApiClient,
}

impl TeamMembersApi<'_> {
    pub async fn list(&self) -> Result<Vec<TeamMember>, ApiClientError> {
        self.api
            .cached_list("team-members", "/api/team-members")
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<TeamMember, ApiClientError> {
        self.api
            .get_json(&format!("/api/team-members/{}", id))
            .await
    }

    pub async fn create<B: Serialize>(&self, payload: &B) -> Result<TeamMember, ApiClientError> {
        let member = self
            .api
            .send(Method::POST, "/api/team-members", Some(payload))
            .await?;
        self.api.invalidate("team-members");
        Ok(member)
    }

    pub async fn update<B: Serialize>(
        &self,
        id: Uuid,
        payload: &B,
    ) -> Result<TeamMember, ApiClientError> {
        let member = self
            .api
            .send(
                Method::PUT,
                &format!("/api/team-members/{}", id),
                Some(payload),
            )
            .await?;
        self.api.invalidate("team-members");
        Ok(member)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiClientError> {
        let _: Value = self
            .api
            .send::<_, Value>(Method::DELETE, &format!("/api/team-members/{}", id), None)
            .await?;
        self.api.invalidate("team-members");
        Ok(())
    }
}

pub struct TasksApi<'a> {
    api: &'a ApiClient,
}

impl TasksApi<'_> {
    pub async fn list(&self) -> Result<Vec<Task>, ApiClientError> {
        self.api.cached_list("tasks", "/api/tasks").await
    }

    pub async fn create<B: Serialize>(&self, payload: &B) -> Result<Task, ApiClientError> {
        let task = self
            .api
            .send(Method::POST, "/api/tasks", Some(payload))
            .await?;
        self.api.invalidate("tasks");
        Ok(task)
    }

    pub async fn update<B: Serialize>(&self, id: Uuid, payload: &B) -> Result<Task, ApiClientError> {
        let task = self
            .api
            .send(Method::PUT, &format!("/api/tasks/{}", id), Some(payload))
            .await?;
        self.api.invalidate("tasks");
        Ok(task)
    }

    pub async fn toggle(&self, id: Uuid) -> Result<Task, ApiClientError> {
        let task = self
            .api
            .send::<_, Value>(Method::PATCH, &format!("/api/tasks/{}/toggle", id), None)
            .await?;
        self.api.invalidate("tasks");
        Ok(task)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiClientError> {
        let _: Value = self
            .api
            .send::<_, Value>(Method::DELETE, &format!("/api/tasks/{}", id), None)
            .await?;
        self.api.invalidate("tasks");
        Ok(())
    }
}

pub struct NotificationsApi<'a> {
    api: &'a ApiClient,
}

impl NotificationsApi<'_> {
    pub async fn list(&self) -> Result<NotificationList, ApiClientError> {
        self.api.get_json("/api/notifications").await
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<(), ApiClientError> {
        let _: Value = self
            .api
            .send::<_, Value>(Method::PATCH, &format!("/api/notifications/{}/read", id), None)
            .await?;
        Ok(())
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiClientError> {
        let _: Value = self
            .api
            .send::<_, Value>(Method::PATCH, "/api/notifications/read-all", None)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiClientError> {
        let _: Value = self
            .api
            .send::<_, Value>(Method::DELETE, &format!("/api/notifications/{}", id), None)
            .await?;
        Ok(())
    }

    pub async fn delete_read(&self) -> Result<(), ApiClientError> {
        let _: Value = self
            .api
            .send::<_, Value>(Method::DELETE, "/api/notifications/read", None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_de_sucesso_devolve_o_data() {
        let body = json!({
            "success": true,
            "message": "Clientes listados com sucesso.",
            "data": [{"name": "Ana"}]
        });

        let data = normalize_envelope(200, body).unwrap();
        assert_eq!(data, json!([{"name": "Ana"}]));
    }

    #[test]
    fn corpo_cru_passa_direto() {
        let body = json!([{"name": "Ana"}]);
        let data = normalize_envelope(200, body.clone()).unwrap();
        assert_eq!(data, body);
    }

    #[test]
    fn envelope_de_erro_vira_api_error() {
        let body = json!({
            "success": false,
            "message": "Cliente não encontrado"
        });

        let err = normalize_envelope(404, body).unwrap_err();
        match err {
            ApiClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Cliente não encontrado");
            }
            other => panic!("erro inesperado: {:?}", other),
        }
    }

    #[test]
    fn status_de_erro_sem_envelope_tambem_falha() {
        let err = normalize_envelope(500, json!("boom")).unwrap_err();
        assert!(matches!(err, ApiClientError::Api { status: 500, .. }));
    }

    #[test]
    fn base_url_perde_a_barra_final() {
        let api = ApiClient::new("http://localhost:3000/");
        assert_eq!(api.base_url, "http://localhost:3000");
    }

    #[tokio::test]
    async fn mark_viewed_invalida_a_lista_em_cache() {
        use axum::routing::{get, patch};
        use axum::{Json as AxumJson, Router};
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let id = Uuid::new_v4();
        let invoice = json!({
            "id": id,
            "invoiceNo": "INV-000001",
            "clientId": Uuid::new_v4(),
            "clientName": "Ana Souza",
            "issueDate": "2025-06-01",
            "dueDate": "2025-07-01",
            "items": [{
                "serviceId": null,
                "description": "Consulta inicial",
                "quantity": 1.0,
                "rate": 200.0,
                "amount": 200.0
            }],
            "subtotal": 200.0,
            "taxRate": 0.0,
            "taxAmount": 0.0,
            "total": 200.0,
            "amountPaid": 0.0,
            "balanceDue": 200.0,
            "status": "Unpaid",
            "clientViewed": false,
            "createdAt": "2025-06-01T12:00:00Z",
            "updatedAt": "2025-06-01T12:00:00Z"
        });

        let hits = Arc::new(AtomicUsize::new(0));
        let list_hits = hits.clone();
        let list_body = json!([invoice.clone()]);

        let app = Router::new()
            .route(
                "/api/invoices",
                get(move || {
                    list_hits.fetch_add(1, Ordering::SeqCst);
                    let body = list_body.clone();
                    async move { AxumJson(body) }
                }),
            )
            .route(
                "/api/invoices/{id}/mark-viewed",
                patch(move || {
                    let body = invoice.clone();
                    async move { AxumJson(body) }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let api = ApiClient::new(&format!("http://{}", addr));
        api.invoices().list().await.unwrap();
        api.invoices().list().await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1, "segunda listagem deve vir do cache");

        api.invoices().mark_viewed(id).await.unwrap();
        api.invoices().list().await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2, "mutação deve invalidar o cache da lista");
    }
}
