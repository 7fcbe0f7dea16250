use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Canonical client. Fields the store did not provide are `null`.
#[derive(ToSchema)]
pub struct ClientDoc {
    pub id: Option<i64>,
    pub nome: Option<String>,
    pub idade: Option<i64>,
    pub uf: Option<String>,
}

/// Create/update body. Also accepted as `application/x-www-form-urlencoded`.
#[derive(ToSchema)]
pub struct ClientInputDoc {
    pub name: String,
    pub age: i64,
    pub uf: String,
}

#[derive(ToSchema)]
pub struct UpdateOutcomeDoc {
    pub id: i64,
    pub affected_rows: u64,
    pub client: Option<ClientDoc>,
}

#[derive(ToSchema)]
pub struct DeleteOutcomeDoc {
    pub id: i64,
    pub affected_rows: u64,
    pub removed: bool,
}

#[derive(ToSchema)]
pub struct ErrorBodyDoc {
    pub error: String,
    pub message: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::clients::list,
        crate::routes::clients::get,
        crate::routes::clients::create,
        crate::routes::clients::update,
        crate::routes::clients::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ClientDoc,
            ClientInputDoc,
            UpdateOutcomeDoc,
            DeleteOutcomeDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "clients")
    )
)]
pub struct ApiDoc;
