//! In-memory broker served by wiremock.
//!
//! Routes every request through one responder holding the broker state, so
//! tests observe the same create/list/delete behaviour a real broker has.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use rhc_rest_api::{BrokerClient, Credentials};
use serde_json::{json, Value};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const PREFIX: &str = "/broker/rest";
pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "s3cret";

const CATALOGUE: &[(&str, &str)] = &[
    ("php-5.3", "standalone"),
    ("ruby-1.8", "standalone"),
    ("mysql-5.1", "embedded"),
];

#[derive(Debug, Default)]
struct App {
    framework: String,
    embedded: Vec<String>,
    events: Vec<String>,
}

#[derive(Debug, Default)]
pub struct BrokerState {
    domains: BTreeMap<String, BTreeMap<String, App>>,
    keys: BTreeMap<String, (String, String)>,
}

impl BrokerState {
    pub fn events(&self, domain: &str, app: &str) -> Vec<String> {
        self.domains
            .get(domain)
            .and_then(|apps| apps.get(app))
            .map(|a| a.events.clone())
            .unwrap_or_default()
    }
}

/// A running mock broker.
pub struct MockBroker {
    pub server: MockServer,
    pub state: Arc<Mutex<BrokerState>>,
}

impl MockBroker {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let state = Arc::new(Mutex::new(BrokerState::default()));

        let handler_state = state.clone();
        Mock::given(wiremock::matchers::any())
            .respond_with(move |req: &Request| {
                let mut state = handler_state.lock().unwrap();
                route(&mut state, req)
            })
            .mount(&server)
            .await;

        Self { server, state }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server.uri(), PREFIX)
    }

    pub async fn connect(&self) -> BrokerClient {
        BrokerClient::connect(self.endpoint(), Credentials::basic(USERNAME, PASSWORD))
            .await
            .expect("connect to mock broker")
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or_default()
    }
}

fn envelope(status: u16, kind: &str, data: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "type": kind,
        "status": "ok",
        "version": "1.0",
        "data": data,
        "messages": []
    }))
}

fn error(status: u16, text: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "type": null,
        "data": null,
        "messages": [{"text": text, "severity": "error", "exit_code": 1}]
    }))
}

fn link(method: &str, href: String) -> Value {
    json!({"method": method, "href": href, "required_params": [], "optional_params": []})
}

fn domain_json(id: &str) -> Value {
    let base = format!("/domains/{id}");
    json!({
        "id": id,
        "links": {
            "ADD_APPLICATION": link("POST", format!("{base}/applications")),
            "LIST_APPLICATIONS": link("GET", format!("{base}/applications")),
            "UPDATE": link("PUT", base.clone()),
            "DELETE": link("DELETE", base)
        }
    })
}

fn app_json(domain: &str, name: &str, app: &App) -> Value {
    let base = format!("/domains/{domain}/applications/{name}");
    json!({
        "name": name,
        "domain_id": domain,
        "framework": app.framework,
        "creation_time": "2012-03-01T10:15:30-05:00",
        "embedded": app.embedded.iter().map(|c| (c.clone(), json!({}))).collect::<serde_json::Map<_, _>>(),
        "links": {
            "ADD_CARTRIDGE": link("POST", format!("{base}/cartridges")),
            "LIST_CARTRIDGES": link("GET", format!("{base}/cartridges")),
            "START": link("POST", format!("{base}/events")),
            "STOP": link("POST", format!("{base}/events")),
            "RESTART": link("POST", format!("{base}/events")),
            "DELETE": link("DELETE", base)
        }
    })
}

fn app_cartridge_json(domain: &str, app: &str, name: &str, embedded: bool) -> Value {
    let base = format!("/domains/{domain}/applications/{app}/cartridges/{name}");
    let links = if embedded {
        json!({
            "START": link("POST", format!("{base}/events")),
            "STOP": link("POST", format!("{base}/events")),
            "RESTART": link("POST", format!("{base}/events")),
            "RELOAD": link("POST", format!("{base}/events")),
            "DELETE": link("DELETE", base)
        })
    } else {
        json!({})
    };
    json!({
        "name": name,
        "type": if embedded { "embedded" } else { "standalone" },
        "links": links
    })
}

fn key_json(name: &str, key_type: &str, content: &str) -> Value {
    let base = format!("/user/keys/{name}");
    json!({
        "name": name,
        "type": key_type,
        "content": content,
        "links": {
            "UPDATE": link("PUT", base.clone()),
            "DELETE": link("DELETE", base)
        }
    })
}

fn form(req: &Request) -> BTreeMap<String, String> {
    serde_urlencoded::from_bytes(&req.body).unwrap_or_default()
}

fn route(state: &mut BrokerState, req: &Request) -> ResponseTemplate {
    let expected_auth = format!(
        "Basic {}",
        base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            format!("{USERNAME}:{PASSWORD}")
        )
    );
    let authorized = req
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected_auth);
    if !authorized {
        return error(401, "Access denied");
    }

    let Some(rest) = req.url.path().strip_prefix(PREFIX) else {
        return error(404, "Not found");
    };
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
    let method = req.method.as_str();
    let params = form(req);

    match (method, segments.as_slice()) {
        ("GET", []) => envelope(
            200,
            "links",
            json!({
                "ADD_DOMAIN": link("POST", "/domains".into()),
                "LIST_DOMAINS": link("GET", "/domains".into()),
                "LIST_CARTRIDGES": link("GET", "/cartridges".into()),
                "GET_USER": link("GET", "/user".into())
            }),
        ),

        ("GET", ["cartridges"]) => envelope(
            200,
            "cartridges",
            CATALOGUE
                .iter()
                .map(|(name, kind)| json!({"name": name, "type": kind, "links": {}}))
                .collect(),
        ),

        ("GET", ["domains"]) => envelope(
            200,
            "domains",
            state.domains.keys().map(|id| domain_json(id)).collect(),
        ),
        ("POST", ["domains"]) => {
            let Some(id) = params.get("id").cloned() else {
                return error(422, "Namespace is required");
            };
            if state.domains.contains_key(&id) {
                return error(409, &format!("Namespace '{id}' is already in use"));
            }
            state.domains.insert(id.clone(), BTreeMap::new());
            envelope(201, "domain", domain_json(&id))
        }
        ("PUT", ["domains", id]) => {
            let Some(new_id) = params.get("domain_id").cloned() else {
                return error(422, "Namespace is required");
            };
            let Some(apps) = state.domains.remove(*id) else {
                return error(404, &format!("Domain {id} not found"));
            };
            state.domains.insert(new_id.clone(), apps);
            envelope(200, "domain", domain_json(&new_id))
        }
        ("DELETE", ["domains", id]) => {
            let force = params.get("force").is_some_and(|f| f == "true");
            match state.domains.get(*id) {
                None => error(404, &format!("Domain {id} not found")),
                Some(apps) if !apps.is_empty() && !force => error(
                    400,
                    "Domain contains applications. Delete applications first or set force to true.",
                ),
                Some(_) => {
                    state.domains.remove(*id);
                    ResponseTemplate::new(204)
                }
            }
        }

        ("GET", ["domains", id, "applications"]) => match state.domains.get(*id) {
            None => error(404, &format!("Domain {id} not found")),
            Some(apps) => envelope(
                200,
                "applications",
                apps.iter()
                    .map(|(name, app)| app_json(id, name, app))
                    .collect(),
            ),
        },
        ("POST", ["domains", id, "applications"]) => {
            let (Some(name), Some(framework)) = (params.get("name"), params.get("cartridge")) else {
                return error(422, "Application name and cartridge are required");
            };
            let Some(apps) = state.domains.get_mut(*id) else {
                return error(404, &format!("Domain {id} not found"));
            };
            if apps.contains_key(name) {
                return error(409, &format!("Application {name} already exists"));
            }
            let app = App {
                framework: framework.clone(),
                ..Default::default()
            };
            let body = app_json(id, name, &app);
            apps.insert(name.clone(), app);
            envelope(201, "application", body)
        }
        ("DELETE", ["domains", id, "applications", name]) => {
            match state.domains.get_mut(*id).and_then(|apps| apps.remove(*name)) {
                Some(_) => ResponseTemplate::new(204),
                None => error(404, &format!("Application {name} not found")),
            }
        }
        ("POST", ["domains", id, "applications", name, "events"]) => {
            let Some(app) = state.domains.get_mut(*id).and_then(|apps| apps.get_mut(*name)) else {
                return error(404, &format!("Application {name} not found"));
            };
            let event = params.get("event").cloned().unwrap_or_default();
            app.events.push(event);
            let body = app_json(id, name, app);
            envelope(200, "application", body)
        }

        ("GET", ["domains", id, "applications", name, "cartridges"]) => {
            let Some(app) = state.domains.get(*id).and_then(|apps| apps.get(*name)) else {
                return error(404, &format!("Application {name} not found"));
            };
            let mut carts = vec![app_cartridge_json(id, name, &app.framework, false)];
            carts.extend(
                app.embedded
                    .iter()
                    .map(|c| app_cartridge_json(id, name, c, true)),
            );
            envelope(200, "cartridges", Value::Array(carts))
        }
        ("POST", ["domains", id, "applications", name, "cartridges"]) => {
            let Some(app) = state.domains.get_mut(*id).and_then(|apps| apps.get_mut(*name)) else {
                return error(404, &format!("Application {name} not found"));
            };
            let Some(cart) = params.get("name").cloned() else {
                return error(422, "Cartridge name is required");
            };
            if !CATALOGUE.iter().any(|(c, kind)| *c == cart && *kind == "embedded") {
                return error(400, &format!("Invalid cartridge {cart}"));
            }
            app.embedded.push(cart.clone());
            envelope(201, "cartridge", app_cartridge_json(id, name, &cart, true))
        }
        ("DELETE", ["domains", id, "applications", name, "cartridges", cart]) => {
            let Some(app) = state.domains.get_mut(*id).and_then(|apps| apps.get_mut(*name)) else {
                return error(404, &format!("Application {name} not found"));
            };
            let before = app.embedded.len();
            app.embedded.retain(|c| c != cart);
            if app.embedded.len() == before {
                error(404, &format!("Cartridge {cart} not embedded"))
            } else {
                ResponseTemplate::new(204)
            }
        }
        ("POST", ["domains", id, "applications", name, "cartridges", cart, "events"]) => {
            let Some(app) = state.domains.get_mut(*id).and_then(|apps| apps.get_mut(*name)) else {
                return error(404, &format!("Application {name} not found"));
            };
            let event = params.get("event").cloned().unwrap_or_default();
            app.events.push(format!("{cart}:{event}"));
            envelope(200, "cartridge", app_cartridge_json(id, name, cart, true))
        }

        ("GET", ["user"]) => envelope(
            200,
            "user",
            json!({
                "login": USERNAME,
                "links": {
                    "ADD_KEY": link("POST", "/user/keys".into()),
                    "LIST_KEYS": link("GET", "/user/keys".into())
                }
            }),
        ),
        ("GET", ["user", "keys"]) => envelope(
            200,
            "keys",
            state
                .keys
                .iter()
                .map(|(name, (key_type, content))| key_json(name, key_type, content))
                .collect(),
        ),
        ("POST", ["user", "keys"]) => {
            let (Some(name), Some(key_type), Some(content)) =
                (params.get("name"), params.get("type"), params.get("content"))
            else {
                return error(422, "Key name, type and content are required");
            };
            state
                .keys
                .insert(name.clone(), (key_type.clone(), content.clone()));
            envelope(201, "key", key_json(name, key_type, content))
        }
        ("PUT", ["user", "keys", name]) => {
            let (Some(key_type), Some(content)) = (params.get("type"), params.get("content")) else {
                return error(422, "Key type and content are required");
            };
            match state.keys.get_mut(*name) {
                None => error(404, &format!("User key '{name}' not found")),
                Some(entry) => {
                    *entry = (key_type.clone(), content.clone());
                    envelope(200, "key", key_json(name, key_type, content))
                }
            }
        }
        ("DELETE", ["user", "keys", name]) => match state.keys.remove(*name) {
            Some(_) => ResponseTemplate::new(204),
            None => error(404, &format!("User key '{name}' not found")),
        },

        _ => error(404, &format!("No route for {method} {rest}")),
    }
}
