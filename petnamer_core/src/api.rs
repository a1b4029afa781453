use crate::category::Category;
use crate::error::ServiceError;
use crate::http::HttpClient;
use crate::selection::RequestedCount;
use crate::transport::{CallOptions, Transport};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct NamesResponse {
    names: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RandomNameResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FactResponse {
    #[serde(default)]
    fact: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Typed routes of the naming/fact service.
#[derive(Clone)]
pub struct PetApi<C: HttpClient> {
    transport: Transport<C>,
}

impl<C: HttpClient> PetApi<C> {
    pub fn new(transport: Transport<C>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport<C> {
        &self.transport
    }

    pub async fn names(
        &self,
        category: Category,
        count: RequestedCount,
    ) -> Result<Vec<String>, ServiceError> {
        let path = format!(
            "/pets/{}/names?count={}&random_selection=true",
            category.as_str(),
            count.get()
        );
        let resp: NamesResponse = self.get(&path).await?;
        Ok(resp.names)
    }

    pub async fn random_name(&self, category: Category) -> Result<String, ServiceError> {
        let path = format!("/pets/{}/random", category.as_str());
        let resp: RandomNameResponse = self.get(&path).await?;
        Ok(resp.name)
    }

    pub async fn category_fact(&self, category: Category) -> Result<Option<String>, ServiceError> {
        let path = format!("/pets/{}/facts/random", category.as_str());
        let resp: FactResponse = self.get(&path).await?;
        Ok(resp.fact)
    }

    pub async fn random_fact(&self) -> Result<Option<String>, ServiceError> {
        let resp: FactResponse = self.get("/facts/random").await?;
        Ok(resp.fact)
    }

    pub async fn health(&self) -> Result<HealthStatus, ServiceError> {
        self.get("/health").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let value = self.transport.call(path, CallOptions::default()).await?;
        serde_json::from_value(value).map_err(|e| ServiceError::MalformedResponse {
            message: format!("{} ({})", e, path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, MockHttpClient};
    use serde_json::json;
    use std::time::Duration;

    fn api(mock: &MockHttpClient) -> PetApi<MockHttpClient> {
        PetApi::new(Transport::new(
            mock.clone(),
            "http://localhost:8000",
            Duration::from_secs(10),
        ))
    }

    #[tokio::test]
    async fn names_uses_exact_route_shape() {
        let mock = MockHttpClient::new();
        mock.add_response(
            "GET /pets/cat/names?count=5&random_selection=true",
            Ok(HttpResponse::json(json!({
                "pet_type": "cat",
                "names": ["A", "B", "C", "D", "E"],
                "count": 5
            }))),
        );

        let names = api(&mock)
            .names(Category::Cat, RequestedCount::clamped(5))
            .await
            .unwrap();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);
    }

    #[tokio::test]
    async fn random_and_fact_routes_decode() {
        let mock = MockHttpClient::new();
        mock.add_response(
            "GET /pets/dog/random",
            Ok(HttpResponse::json(json!({"pet_type": "dog", "name": "Rex", "message": "Perfect"}))),
        );
        mock.add_response(
            "GET /pets/fish/facts/random",
            Ok(HttpResponse::json(json!({"pet_type": "fish", "fact": "Fish sleep with eyes open."}))),
        );
        mock.add_response("GET /facts/random", Ok(HttpResponse::json(json!({"pet_type": "dog"}))));
        mock.add_response(
            "GET /health",
            Ok(HttpResponse::json(json!({"status": "healthy", "message": "ok"}))),
        );

        let api = api(&mock);
        assert_eq!(api.random_name(Category::Dog).await.unwrap(), "Rex");
        assert_eq!(
            api.category_fact(Category::Fish).await.unwrap().as_deref(),
            Some("Fish sleep with eyes open.")
        );
        assert_eq!(api.random_fact().await.unwrap(), None);
        assert_eq!(api.health().await.unwrap().status, "healthy");
    }

    #[tokio::test]
    async fn wrong_shape_is_malformed() {
        let mock = MockHttpClient::new();
        mock.add_response("GET /pets/bird/random", Ok(HttpResponse::json(json!({"names": []}))));

        let err = api(&mock).random_name(Category::Bird).await.unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse { .. }));
    }
}
