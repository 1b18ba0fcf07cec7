//! Behaviour tests for the generated OpenAPI document.
use std::sync::Mutex;

use bloglist::doc::{ApiDoc, BEARER_SCHEME};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use utoipa::OpenApi;
use utoipa::openapi::RefOr;
use utoipa::openapi::schema::Schema;

// utoipa replaces :: with . in schema names
const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

#[derive(Default)]
struct OpenApiWorld {
    document: Option<utoipa::openapi::OpenApi>,
}

impl std::fmt::Debug for OpenApiWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenApiWorld")
            .field("document", &self.document.as_ref().map(|_| "<OpenApi>"))
            .finish()
    }
}

#[fixture]
fn world() -> Mutex<OpenApiWorld> {
    Mutex::new(OpenApiWorld::default())
}

fn with_document(world: &Mutex<OpenApiWorld>, f: impl FnOnce(&utoipa::openapi::OpenApi)) {
    let world = world.lock().expect("world lock");
    f(world.document.as_ref().expect("document generated"));
}

#[given("the OpenAPI document is generated")]
fn generate_openapi_document(world: &Mutex<OpenApiWorld>) {
    let mut world = world.lock().expect("world lock");
    world.document = Some(ApiDoc::openapi());
}

#[when("the document is inspected")]
fn inspect_document(world: &Mutex<OpenApiWorld>) {
    with_document(world, |doc| {
        assert!(
            doc.to_json().is_ok(),
            "document should serialise to JSON"
        );
    });
}

#[then("the blog endpoints are listed")]
fn blog_endpoints_listed(world: &Mutex<OpenApiWorld>) {
    with_document(world, |doc| {
        let blogs = doc.paths.paths.get("/api/blogs").expect("/api/blogs");
        assert!(blogs.get.is_some() && blogs.post.is_some());
        let by_id = doc.paths.paths.get("/api/blogs/{id}").expect("/api/blogs/{id}");
        assert!(by_id.put.is_some() && by_id.delete.is_some());
        assert!(doc.paths.paths.contains_key("/api/blogs/stats"));
    });
}

#[then("the user endpoints are listed")]
fn user_endpoints_listed(world: &Mutex<OpenApiWorld>) {
    with_document(world, |doc| {
        let users = doc.paths.paths.get("/api/users").expect("/api/users");
        assert!(users.get.is_some() && users.post.is_some());
        let login = doc.paths.paths.get("/api/login").expect("/api/login");
        assert!(login.post.is_some());
    });
}

#[then("the bearer security scheme is registered")]
fn bearer_scheme_registered(world: &Mutex<OpenApiWorld>) {
    with_document(world, |doc| {
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    });
}

#[then("creating a blog requires the bearer scheme")]
fn create_blog_requires_bearer(world: &Mutex<OpenApiWorld>) {
    with_document(world, |doc| {
        let blogs = doc.paths.paths.get("/api/blogs").expect("/api/blogs");
        let post = blogs.post.as_ref().expect("POST /api/blogs");
        let security = serde_json::to_string(&post.security).expect("security JSON");
        assert!(security.contains(BEARER_SCHEME));
    });
}

#[then("the error schema exposes error, code and traceId")]
fn error_schema_shape(world: &Mutex<OpenApiWorld>) {
    with_document(world, |doc| {
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let Some(RefOr::T(Schema::Object(error))) = schemas.get(ERROR_SCHEMA_NAME) else {
            panic!("expected Error object schema");
        };
        for field in ["error", "code", "traceId", "details"] {
            assert!(
                error.properties.contains_key(field),
                "Error schema should have '{field}'"
            );
        }
    });
}

#[scenario(
    path = "tests/features/openapi.feature",
    name = "Blog and user endpoints are documented"
)]
fn endpoints_are_documented(world: Mutex<OpenApiWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/openapi.feature",
    name = "Only blog creation requires a bearer token"
)]
fn bearer_security_is_documented(world: Mutex<OpenApiWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/openapi.feature",
    name = "Errors use the shared wire shape"
)]
fn error_shape_is_documented(world: Mutex<OpenApiWorld>) {
    drop(world);
}
