use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Fixed timestamp stamped onto created records. The client treats timestamps
/// as opaque strings, so the mock never needs a clock.
pub const MOCK_TIMESTAMP: &str = "2024-01-01T00:00:00Z";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersonRole {
    pub id: u64,
    pub r#type: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Member {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub date_of_birth: String,
    pub gender_code: Option<String>,
    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub created_at: String,
    pub updated_at: String,
    pub person_roles: Vec<PersonRole>,
}

#[derive(Deserialize)]
pub struct CreatePersonRole {
    pub r#type: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Deserialize)]
pub struct CreateMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub date_of_birth: String,
    pub gender_code: Option<String>,
    pub street: String,
    pub city: String,
    pub zip_code: String,
    #[serde(default)]
    pub person_roles: Vec<CreatePersonRole>,
}

/// Members in insertion order, so the collection endpoint has a
/// deterministic server-supplied order.
pub type Db = Arc<RwLock<Vec<Member>>>;

pub fn app() -> Router {
    app_with_members(Vec::new())
}

pub fn app_with_members(members: Vec<Member>) -> Router {
    let db: Db = Arc::new(RwLock::new(members));
    Router::new()
        .route("/api/v1/people", get(list_people).post(create_person))
        .route("/api/v1/people/{id}", get(get_person))
        .with_state(db)
}

/// Serve the given router until the listener closes.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

/// Serve the sample-seeded API, as the dev binary does.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app_with_members(sample_members())).await
}

/// Seed data for the dev server and integration tests: one member with
/// roles, one without roles or mobile, one with an unrecognized gender code.
pub fn sample_members() -> Vec<Member> {
    let ts = || MOCK_TIMESTAMP.to_string();
    vec![
        Member {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.io".to_string(),
            mobile: Some("+44 20 0000".to_string()),
            date_of_birth: "1815-12-10".to_string(),
            gender_code: Some("female".to_string()),
            street: "12 St James Square".to_string(),
            city: "London".to_string(),
            zip_code: "SW1Y".to_string(),
            created_at: ts(),
            updated_at: ts(),
            person_roles: vec![
                PersonRole {
                    id: 10,
                    r#type: "volunteer".to_string(),
                    active: true,
                    created_at: ts(),
                    updated_at: ts(),
                },
                PersonRole {
                    id: 11,
                    r#type: "board".to_string(),
                    active: false,
                    created_at: ts(),
                    updated_at: ts(),
                },
            ],
        },
        Member {
            id: 2,
            first_name: "Charles".to_string(),
            last_name: "Babbage".to_string(),
            email: "charles@x.io".to_string(),
            mobile: None,
            date_of_birth: "1791-12-26".to_string(),
            gender_code: Some("male".to_string()),
            street: "1 Dorset St".to_string(),
            city: "London".to_string(),
            zip_code: "W1U".to_string(),
            created_at: ts(),
            updated_at: ts(),
            person_roles: Vec::new(),
        },
        Member {
            id: 3,
            first_name: "Alex".to_string(),
            last_name: "Example".to_string(),
            email: "alex@x.io".to_string(),
            mobile: Some("+41 79 000 00 00".to_string()),
            date_of_birth: "1990-05-05".to_string(),
            gender_code: None,
            street: "Bahnhofstrasse 1".to_string(),
            city: "Zurich".to_string(),
            zip_code: "8001".to_string(),
            created_at: ts(),
            updated_at: ts(),
            person_roles: vec![PersonRole {
                id: 12,
                r#type: "member".to_string(),
                active: true,
                created_at: ts(),
                updated_at: ts(),
            }],
        },
    ]
}

async fn list_people(State(db): State<Db>) -> Json<Vec<Member>> {
    let people = db.read().await;
    Json(people.clone())
}

async fn get_person(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Member>, StatusCode> {
    let people = db.read().await;
    people
        .iter()
        .find(|member| member.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_person(
    State(db): State<Db>,
    Json(input): Json<CreateMember>,
) -> (StatusCode, Json<Member>) {
    let mut people = db.write().await;
    let id = people.iter().map(|member| member.id).max().unwrap_or(0) + 1;
    let member = Member {
        id,
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        mobile: input.mobile,
        date_of_birth: input.date_of_birth,
        gender_code: input.gender_code,
        street: input.street,
        city: input.city,
        zip_code: input.zip_code,
        created_at: MOCK_TIMESTAMP.to_string(),
        updated_at: MOCK_TIMESTAMP.to_string(),
        person_roles: input
            .person_roles
            .into_iter()
            .enumerate()
            .map(|(index, role)| PersonRole {
                id: index as u64 + 1,
                r#type: role.r#type,
                active: role.active,
                created_at: MOCK_TIMESTAMP.to_string(),
                updated_at: MOCK_TIMESTAMP.to_string(),
            })
            .collect(),
    };
    people.push(member.clone());
    (StatusCode::CREATED, Json(member))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_serializes_with_snake_case_fields() {
        let member = &sample_members()[0];
        let json = serde_json::to_value(member).unwrap();
        assert_eq!(json["first_name"], "Ada");
        assert_eq!(json["zip_code"], "SW1Y");
        assert_eq!(json["person_roles"][0]["type"], "volunteer");
    }

    #[test]
    fn member_serializes_null_mobile() {
        let member = &sample_members()[1];
        let json = serde_json::to_value(member).unwrap();
        assert!(json["mobile"].is_null());
        assert_eq!(json["person_roles"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn member_roundtrips_through_json() {
        let member = &sample_members()[0];
        let json = serde_json::to_string(member).unwrap();
        let back: Member = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, member.id);
        assert_eq!(back.person_roles.len(), member.person_roles.len());
    }

    #[test]
    fn create_member_defaults_roles_to_empty() {
        let input: CreateMember = serde_json::from_str(
            r#"{"first_name":"New","last_name":"Person","email":"new@x.io",
                "mobile":null,"date_of_birth":"2000-01-01","gender_code":"female",
                "street":"S","city":"C","zip_code":"Z"}"#,
        )
        .unwrap();
        assert!(input.person_roles.is_empty());
    }

    #[test]
    fn create_member_rejects_missing_email() {
        let result: Result<CreateMember, _> = serde_json::from_str(
            r#"{"first_name":"New","last_name":"Person","mobile":null,
                "date_of_birth":"2000-01-01","gender_code":null,
                "street":"S","city":"C","zip_code":"Z"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn create_role_defaults_active_to_false() {
        let input: CreatePersonRole = serde_json::from_str(r#"{"type":"volunteer"}"#).unwrap();
        assert_eq!(input.r#type, "volunteer");
        assert!(!input.active);
    }
}
