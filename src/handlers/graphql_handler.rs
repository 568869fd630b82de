use actix_web::{get, post, web, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::{auth::AuthenticatedUser, graphql::Schema};

/// Anonymous requests are executed too; resolvers that need a session
/// reject them.
#[post("/graphql")]
async fn graphql(
    schema: web::Data<Schema>,
    auth: Option<AuthenticatedUser>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();
    if let Some(AuthenticatedUser(session)) = auth {
        request = request.data(session);
    }
    schema.execute(request).await.into()
}

#[get("/graphiql")]
async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
