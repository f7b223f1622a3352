use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use deening_core::ai::{FakeAiClient, FakeImageGenerator};
use deening_core::http::MockClient;
use deening_core::store::{Collection, DocumentStore, MemoryStore};
use deening_core::ContentGenerator;
use deening_server::config::ServerConfig;
use deening_server::{build_router, AppContext};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const TOKEN: &str = "test-token";
const IMAGE_URL: &str = "https://images.example/dish.png";
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

const KIMCHI_STEW: &str = r#"{
  "name": "kimchi stew",
  "description": "A spicy, comforting Korean stew",
  "servings": 2,
  "prepTime": "10 minutes",
  "cookTime": "20 minutes",
  "totalTime": "30 minutes",
  "difficulty": "easy",
  "ingredients": [
    {"name": "kimchi", "amount": 200, "unit": "g"},
    {"name": "pork belly", "amount": 150, "unit": "g"}
  ],
  "instructions": [
    {"step": 1, "description": "Saute the pork and kimchi."},
    {"step": 2, "description": "Add water and simmer."}
  ],
  "nutrition": {"calories": 420, "protein": "25", "carbohydrates": "12", "fat": "30"},
  "tags": ["korean"],
  "source": "traditional"
}"#;

struct TestApp {
    router: Router,
    ai: Arc<FakeAiClient>,
    images: Arc<FakeImageGenerator>,
    store: Arc<MemoryStore>,
}

impl TestApp {
    fn new(ai: FakeAiClient) -> Self {
        let ai = Arc::new(ai);
        let images = Arc::new(FakeImageGenerator::new(IMAGE_URL));
        let http = Arc::new(MockClient::new().with_bytes(IMAGE_URL, PNG_BYTES.to_vec()));
        let store = Arc::new(MemoryStore::new());

        let router = build_router(Arc::new(AppContext {
            generator: ContentGenerator::new(ai.clone(), images.clone(), http),
            store: store.clone(),
            config: ServerConfig::with_token(TOKEN),
        }));

        Self {
            router,
            ai,
            images,
            store,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN));
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }
}

fn multipart_image(field: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let boundary = "deening-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"fridge.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

#[tokio::test]
async fn test_ping_is_public() {
    let app = TestApp::new(FakeAiClient::new());
    let request = Request::get("/ping").body(Body::empty()).unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "pong"}));
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new(FakeAiClient::new());

    let request = Request::get("/refrigerator/ingredients")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let request = Request::get("/refrigerator/ingredients")
        .header(header::AUTHORIZATION, "Bearer wrong-token")
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_recipe_is_generated_once_per_food_name() {
    let app = TestApp::new(FakeAiClient::new().with_default_response(KIMCHI_STEW));

    let (status, first) = app
        .call(Method::POST, "/recipe", Some(json!({"food_name": "kimchi stew"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["recipe"]["name"], "kimchi stew");
    assert_eq!(first["recipe"]["prepTime"], "10 minutes");
    assert!(first["image_base64"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));

    let (status, second) = app
        .call(Method::POST, "/recipe", Some(json!({"food_name": "kimchi stew"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(app.ai.calls(), 1);
    assert_eq!(app.images.calls(), 1);

    let id = first["id"].as_str().unwrap();
    let (status, fetched) = app
        .call(Method::GET, &format!("/recipe/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, first);
}

#[tokio::test]
async fn test_malformed_generation_is_rejected_and_not_stored() {
    let app = TestApp::new(FakeAiClient::new().with_default_response("Sorry, I can't help with that."));

    let (status, body) = app
        .call(Method::POST, "/recipe", Some(json!({"food_name": "kimchi stew"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(app.images.calls(), 0);
    assert!(app
        .store
        .find_all(Collection::Recipes)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_unknown_recipe_is_not_found() {
    let app = TestApp::new(FakeAiClient::new());

    let (status, _) = app
        .call(
            Method::GET,
            "/recipe/00000000-0000-4000-8000-000000000000",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.call(Method::GET, "/recipe/not-an-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .call(
            Method::POST,
            "/recipe/chat",
            Some(json!({"recipe_id": "not-an-id", "question": "Spicier?"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.ai.calls(), 0);
}

#[tokio::test]
async fn test_search_recipes() {
    let app = TestApp::new(FakeAiClient::new().with_default_response(KIMCHI_STEW));
    app.call(Method::POST, "/recipe", Some(json!({"food_name": "kimchi stew"})))
        .await;

    let (status, body) = app
        .call(Method::GET, "/recipe/search?query=KIMCHI", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search_results"].as_array().unwrap().len(), 1);
    assert_eq!(body["search_results"][0]["name"], "kimchi stew");

    let (status, _) = app.call(Method::GET, "/recipe/search?query=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cooking_step_validates_step_number() {
    let app = TestApp::new(FakeAiClient::new().with_default_response(KIMCHI_STEW));
    let (_, recipe) = app
        .call(Method::POST, "/recipe", Some(json!({"food_name": "kimchi stew"})))
        .await;

    let (status, _) = app
        .call(
            Method::POST,
            "/recipe/cooking_step",
            Some(json!({"recipe_id": recipe["id"], "step_number": 0})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call(
            Method::POST,
            "/recipe/cooking_step",
            Some(json!({"recipe_id": recipe["id"], "step_number": -2})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.ai.calls(), 1);
}

#[tokio::test]
async fn test_generate_free_form() {
    let app = TestApp::new(FakeAiClient::new().with_default_response("Here is a haiku."));
    let (status, body) = app
        .call(Method::POST, "/generate", Some(json!({"prompt": "Write a haiku"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"generated_text": "Here is a haiku."}));
}

#[tokio::test]
async fn test_refrigerator_accumulates_amounts() {
    let app = TestApp::new(FakeAiClient::new());
    let eggs = json!({"ingredients": [
        {"name": "egg", "amount": 2, "unit": "ea", "category": "dairy"}
    ]});

    let (status, _) = app
        .call(Method::PUT, "/refrigerator/ingredients", Some(eggs.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    app.call(Method::PUT, "/refrigerator/ingredients", Some(eggs))
        .await;

    let (status, body) = app
        .call(Method::GET, "/refrigerator/ingredients/dairy", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["ingredients"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["amount"], 4.0);
    assert_eq!(items[0]["storage_type"], "REFRIGERATED");

    let (_, body) = app.call(Method::GET, "/refrigerator/ingredients", None).await;
    assert_eq!(body["refrigerator"]["categories"][0]["category"], "dairy");
}

#[tokio::test]
async fn test_refrigerator_update_and_delete() {
    let app = TestApp::new(FakeAiClient::new());
    app.call(
        Method::PUT,
        "/refrigerator/ingredients",
        Some(json!({"ingredients": [
            {"name": "leek", "amount": 1, "unit": "ea", "category": "vegetables"}
        ]})),
    )
    .await;
    let (_, body) = app
        .call(Method::GET, "/refrigerator/ingredients/vegetables", None)
        .await;
    let id = body["ingredients"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/refrigerator/ingredient/{}", id),
            Some(json!({"name": "leek", "amount": 3, "unit": "ea", "category": "vegetables", "storage_type": "FROZEN"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .call(Method::GET, "/refrigerator/ingredients/vegetables", None)
        .await;
    assert_eq!(body["ingredients"][0]["amount"], 3.0);
    assert_eq!(body["ingredients"][0]["storage_type"], "FROZEN");

    let uri = format!("/refrigerator/ingredient/{}", id);
    let (status, _) = app.call(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.call(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_refrigerator_update_cannot_duplicate_item() {
    let app = TestApp::new(FakeAiClient::new());
    app.call(
        Method::PUT,
        "/refrigerator/ingredients",
        Some(json!({"ingredients": [
            {"name": "milk", "amount": 1, "unit": "L", "category": "dairy"},
            {"name": "oat milk", "amount": 1, "unit": "L", "category": "dairy"}
        ]})),
    )
    .await;
    let (_, body) = app
        .call(Method::GET, "/refrigerator/ingredients/dairy", None)
        .await;
    let oat_id = body["ingredients"][1]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/refrigerator/ingredient/{}", oat_id),
            Some(json!({"name": "milk", "amount": 2, "unit": "L", "category": "dairy"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    let (_, body) = app
        .call(Method::GET, "/refrigerator/ingredients/dairy", None)
        .await;
    assert_eq!(body["ingredients"][1]["name"], "oat milk");
}

#[tokio::test]
async fn test_rearrange_replaces_layout() {
    let app = TestApp::new(FakeAiClient::new().with_default_response(
        r#"{"categories": [
            {"category": "Produce", "ingredients": [{"name": "leek", "amount": 1, "unit": "ea"}]},
            {"category": "Dairy", "ingredients": [{"name": "egg", "amount": 6, "unit": "ea"}]}
        ]}"#,
    ));
    app.call(
        Method::PUT,
        "/refrigerator/ingredients",
        Some(json!({"ingredients": [
            {"name": "egg", "amount": 6, "unit": "ea", "category": "misc"},
            {"name": "leek", "amount": 1, "unit": "ea", "category": "misc", "storage_type": "ROOM_TEMPERATURE"}
        ]})),
    )
    .await;

    let (status, body) = app
        .call(Method::POST, "/refrigerator/rearrange-refrigerator", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let categories = body["refrigerator"]["categories"].as_array().unwrap();
    assert_eq!(categories[0]["category"], "Produce");
    assert_eq!(
        categories[0]["ingredients"][0]["storage_type"],
        "ROOM_TEMPERATURE"
    );

    let (_, misc) = app
        .call(Method::GET, "/refrigerator/ingredients/misc", None)
        .await;
    assert!(misc["ingredients"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_detect_ingredients() {
    let app = TestApp::new(
        FakeAiClient::new().with_default_response(r#"{"ingredients": ["egg", "leek"]}"#),
    );
    let (content_type, body) = multipart_image("image", PNG_BYTES);
    let request = Request::post("/refrigerator/ingredient-detect")
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"ingredients": [{"ingredient_name": "egg"}, {"ingredient_name": "leek"}]})
    );
}

#[tokio::test]
async fn test_detect_nothing_found_is_404() {
    let app = TestApp::new(FakeAiClient::new().with_default_response(r#"{"ingredients": []}"#));
    let (content_type, body) = multipart_image("image", PNG_BYTES);
    let request = Request::post("/refrigerator/ingredient-detect")
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "No ingredients found in the image"}));
}

#[tokio::test]
async fn test_detect_rejects_non_image_upload() {
    let app = TestApp::new(FakeAiClient::new().with_default_response(r#"{"ingredients": []}"#));
    let (content_type, body) = multipart_image("image", b"plain text, not a photo");
    let request = Request::post("/refrigerator/ingredient-detect")
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();

    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.ai.calls(), 0);
}

#[tokio::test]
async fn test_preference_keywords() {
    let app = TestApp::new(FakeAiClient::new());

    let (status, _) = app
        .call(
            Method::PUT,
            "/preferences/keywords",
            Some(json!({"name": "spicy", "type": "LIKE"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .call(
            Method::PUT,
            "/preferences/keywords",
            Some(json!({"name": "spicy", "type": "LIKE"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Keyword already exists");

    let (_, body) = app.call(Method::GET, "/preferences/keywords", None).await;
    let keywords = body["preference"]["keywords"].as_array().unwrap();
    assert_eq!(keywords.len(), 1);
    assert_eq!(keywords[0]["type"], "LIKE");
    let uri = format!("/preferences/keyword/{}", keywords[0]["id"].as_str().unwrap());

    let (status, body) = app
        .call(Method::PATCH, &uri, Some(json!({"name": "spicy"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No changes were made");

    let (status, body) = app
        .call(Method::PATCH, &uri, Some(json!({"type": "DISLIKE"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Keyword updated successfully");

    let (status, _) = app.call(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .call(Method::PATCH, &uri, Some(json!({"name": "mild"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
