//! Pipeline and trigger property endpoints
//!
//! Pipeline properties live at `/tekton_pipelines/{id}/properties` and
//! trigger properties at `/tekton_pipelines/{id}/triggers/{trigger_id}/properties`;
//! both take the same request shapes.

use reqwest::Method;
use tekton_core::domain::property::{PropertiesCollection, Property};
use tekton_core::dto::QueryParams;
use tekton_core::dto::property::{ListProperties, PropertyPrototype};

use crate::error::Result;
use crate::{TektonPipelineClient, require};

impl TektonPipelineClient {
    // =============================================================================
    // Pipeline Properties
    // =============================================================================

    /// List the properties of a pipeline
    pub async fn list_tekton_pipeline_properties(
        &self,
        pipeline_id: &str,
        opts: &ListProperties,
    ) -> Result<PropertiesCollection> {
        require("pipeline_id", pipeline_id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "properties"])?;
        let request = self
            .request(Method::GET, url)
            .query(&opts.query_pairs());
        let response = self.send(request).await?;

        self.handle_response(response).await
    }

    /// Add a property to a pipeline
    pub async fn create_tekton_pipeline_property(
        &self,
        pipeline_id: &str,
        req: &PropertyPrototype,
    ) -> Result<Property> {
        require("pipeline_id", pipeline_id)?;
        require("name", &req.name)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "properties"])?;
        let response = self.send(self.request(Method::POST, url).json(req)).await?;

        self.handle_response(response).await
    }

    /// Get a pipeline property by name
    ///
    /// Secure values come back masked.
    pub async fn get_tekton_pipeline_property(
        &self,
        pipeline_id: &str,
        property_name: &str,
    ) -> Result<Property> {
        require("pipeline_id", pipeline_id)?;
        require("property_name", property_name)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "properties", property_name])?;
        let response = self.send(self.request(Method::GET, url)).await?;

        self.handle_response(response).await
    }

    /// Replace a pipeline property
    ///
    /// `req.name` must match `property_name`; the service rejects renames.
    pub async fn replace_tekton_pipeline_property(
        &self,
        pipeline_id: &str,
        property_name: &str,
        req: &PropertyPrototype,
    ) -> Result<Property> {
        require("pipeline_id", pipeline_id)?;
        require("property_name", property_name)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "properties", property_name])?;
        let response = self.send(self.request(Method::PUT, url).json(req)).await?;

        self.handle_response(response).await
    }

    /// Delete a pipeline property
    pub async fn delete_tekton_pipeline_property(
        &self,
        pipeline_id: &str,
        property_name: &str,
    ) -> Result<()> {
        require("pipeline_id", pipeline_id)?;
        require("property_name", property_name)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "properties", property_name])?;
        let response = self.send(self.request(Method::DELETE, url)).await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Trigger Properties
    // =============================================================================

    /// List the properties of a trigger
    pub async fn list_tekton_pipeline_trigger_properties(
        &self,
        pipeline_id: &str,
        trigger_id: &str,
        opts: &ListProperties,
    ) -> Result<PropertiesCollection> {
        require("pipeline_id", pipeline_id)?;
        require("trigger_id", trigger_id)?;

        let url = self.endpoint(&[
            "tekton_pipelines",
            pipeline_id,
            "triggers",
            trigger_id,
            "properties",
        ])?;
        let request = self
            .request(Method::GET, url)
            .query(&opts.query_pairs());
        let response = self.send(request).await?;

        self.handle_response(response).await
    }

    /// Add a property to a trigger
    pub async fn create_tekton_pipeline_trigger_property(
        &self,
        pipeline_id: &str,
        trigger_id: &str,
        req: &PropertyPrototype,
    ) -> Result<Property> {
        require("pipeline_id", pipeline_id)?;
        require("trigger_id", trigger_id)?;
        require("name", &req.name)?;

        let url = self.endpoint(&[
            "tekton_pipelines",
            pipeline_id,
            "triggers",
            trigger_id,
            "properties",
        ])?;
        let response = self.send(self.request(Method::POST, url).json(req)).await?;

        self.handle_response(response).await
    }

    /// Get a trigger property by name
    pub async fn get_tekton_pipeline_trigger_property(
        &self,
        pipeline_id: &str,
        trigger_id: &str,
        property_name: &str,
    ) -> Result<Property> {
        require("pipeline_id", pipeline_id)?;
        require("trigger_id", trigger_id)?;
        require("property_name", property_name)?;

        let url = self.endpoint(&[
            "tekton_pipelines",
            pipeline_id,
            "triggers",
            trigger_id,
            "properties",
            property_name,
        ])?;
        let response = self.send(self.request(Method::GET, url)).await?;

        self.handle_response(response).await
    }

    /// Replace a trigger property
    pub async fn replace_tekton_pipeline_trigger_property(
        &self,
        pipeline_id: &str,
        trigger_id: &str,
        property_name: &str,
        req: &PropertyPrototype,
    ) -> Result<Property> {
        require("pipeline_id", pipeline_id)?;
        require("trigger_id", trigger_id)?;
        require("property_name", property_name)?;

        let url = self.endpoint(&[
            "tekton_pipelines",
            pipeline_id,
            "triggers",
            trigger_id,
            "properties",
            property_name,
        ])?;
        let response = self.send(self.request(Method::PUT, url).json(req)).await?;

        self.handle_response(response).await
    }

    /// Delete a trigger property
    pub async fn delete_tekton_pipeline_trigger_property(
        &self,
        pipeline_id: &str,
        trigger_id: &str,
        property_name: &str,
    ) -> Result<()> {
        require("pipeline_id", pipeline_id)?;
        require("trigger_id", trigger_id)?;
        require("property_name", property_name)?;

        let url = self.endpoint(&[
            "tekton_pipelines",
            pipeline_id,
            "triggers",
            trigger_id,
            "properties",
            property_name,
        ])?;
        let response = self.send(self.request(Method::DELETE, url)).await?;

        self.handle_empty_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use crate::test_support::{MockServer, property_json};
    use serde_json::{Value, json};
    use tekton_core::domain::property::PropertyType;

    const PIPELINE_ID: &str = "94619026-912b-4d92-8f51-6c74f0692d90";
    const TRIGGER_ID: &str = "1bb892a1-2e04-4768-a369-b1159eace147";

    #[tokio::test]
    async fn test_list_pipeline_properties_with_filters() {
        let server = MockServer::respond(
            200,
            json!({ "properties": [property_json("token", "secure", "****")] }),
        )
        .await;

        let collection = server
            .client()
            .list_tekton_pipeline_properties(
                PIPELINE_ID,
                &ListProperties {
                    name: Some("token".into()),
                    types: vec![PropertyType::Secure, PropertyType::Text],
                    sort: Some("name".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(collection.properties[0].property_type, Some(PropertyType::Secure));
        let req = server.single_request();
        assert_eq!(
            req.path,
            format!("/pipeline/v2/tekton_pipelines/{}/properties", PIPELINE_ID)
        );
        assert_eq!(
            req.query_pairs(),
            vec![
                ("name".to_string(), "token".to_string()),
                ("type".to_string(), "secure,text".to_string()),
                ("sort".to_string(), "name".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_pipeline_property() {
        let server = MockServer::respond(201, property_json("env", "text", "prod")).await;

        let property = server
            .client()
            .create_tekton_pipeline_property(PIPELINE_ID, &PropertyPrototype::text("env", "prod"))
            .await
            .unwrap();

        assert_eq!(property.value.as_deref(), Some("prod"));
        let req = server.single_request();
        assert_eq!(req.method, "POST");
        assert_eq!(
            req.body,
            Some(json!({ "name": "env", "type": "text", "value": "prod" }))
        );
    }

    #[tokio::test]
    async fn test_pipeline_property_name_is_encoded() {
        let server = MockServer::respond(200, property_json("my prop", "text", "x")).await;

        server
            .client()
            .get_tekton_pipeline_property(PIPELINE_ID, "my prop")
            .await
            .unwrap();

        assert_eq!(
            server.single_request().path,
            format!("/pipeline/v2/tekton_pipelines/{}/properties/my%20prop", PIPELINE_ID)
        );
    }

    #[tokio::test]
    async fn test_replace_and_delete_pipeline_property() {
        let server = MockServer::sequence(vec![
            (200, property_json("env", "text", "staging")),
            (204, Value::Null),
        ])
        .await;
        let client = server.client();

        let property = client
            .replace_tekton_pipeline_property(
                PIPELINE_ID,
                "env",
                &PropertyPrototype::text("env", "staging"),
            )
            .await
            .unwrap();
        assert_eq!(property.value.as_deref(), Some("staging"));

        client
            .delete_tekton_pipeline_property(PIPELINE_ID, "env")
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[1].method, "DELETE");
        assert!(requests[1].path.ends_with("/properties/env"));
    }

    #[tokio::test]
    async fn test_trigger_property_crud_paths() {
        let server = MockServer::sequence(vec![
            (200, json!({ "properties": [] })),
            (201, property_json("branch", "text", "main")),
            (200, property_json("branch", "text", "main")),
            (200, property_json("branch", "text", "dev")),
            (204, Value::Null),
        ])
        .await;
        let client = server.client();

        client
            .list_tekton_pipeline_trigger_properties(PIPELINE_ID, TRIGGER_ID, &ListProperties::default())
            .await
            .unwrap();
        client
            .create_tekton_pipeline_trigger_property(
                PIPELINE_ID,
                TRIGGER_ID,
                &PropertyPrototype::text("branch", "main"),
            )
            .await
            .unwrap();
        client
            .get_tekton_pipeline_trigger_property(PIPELINE_ID, TRIGGER_ID, "branch")
            .await
            .unwrap();
        client
            .replace_tekton_pipeline_trigger_property(
                PIPELINE_ID,
                TRIGGER_ID,
                "branch",
                &PropertyPrototype::text("branch", "dev"),
            )
            .await
            .unwrap();
        client
            .delete_tekton_pipeline_trigger_property(PIPELINE_ID, TRIGGER_ID, "branch")
            .await
            .unwrap();

        let base = format!(
            "/pipeline/v2/tekton_pipelines/{}/triggers/{}/properties",
            PIPELINE_ID, TRIGGER_ID
        );
        let seen: Vec<(String, String)> = server
            .requests()
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("GET".to_string(), base.clone()),
                ("POST".to_string(), base.clone()),
                ("GET".to_string(), format!("{}/branch", base)),
                ("PUT".to_string(), format!("{}/branch", base)),
                ("DELETE".to_string(), format!("{}/branch", base)),
            ]
        );
        assert!(server.requests()[0].query.is_none());
    }

    #[tokio::test]
    async fn test_create_property_requires_name() {
        let server = MockServer::respond(201, json!({})).await;

        let err = server
            .client()
            .create_tekton_pipeline_property(PIPELINE_ID, &PropertyPrototype::text("", "x"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::InvalidRequest(_)));
        assert!(server.requests().is_empty());
    }
}
