//! Integration tests for the HTTP city collection.
//!
//! A wiremock server stands in for the REST endpoint, so these tests cover
//! the wire format, status mapping, and the store running over real HTTP.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use worldwise::core::config::SelectionOrdering;
use worldwise::core::types::{CityId, NewCity, Position};
use worldwise::remote::geocode::{Place, ReverseGeocoder};
use worldwise::remote::http::HttpCityCollection;
use worldwise::remote::{CityCollection, RemoteError};
use worldwise::store::{CitiesStore, DELETE_CITY_FAILED, LOAD_CITY_FAILED};

fn city_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "cityName": name,
        "country": "Portugal",
        "emoji": "🇵🇹",
        "date": "2027-10-31T15:59:59.138Z",
        "notes": "",
        "position": { "lat": 38.72, "lng": -9.14 }
    })
}

fn collection(server: &MockServer) -> HttpCityCollection {
    HttpCityCollection::new(&server.uri()).unwrap()
}

async fn mount_get(server: &MockServer, id: u64, name: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/cities/{}", id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(city_json(id, name))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

// =============================================================================
// Collection calls
// =============================================================================

mod collection_calls {
    use super::*;

    #[tokio::test]
    async fn list_cities_decodes_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([city_json(1, "Lisbon"), city_json(2, "Porto")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let cities = collection(&server).list_cities().await.unwrap();

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].id, CityId::new(1));
        assert_eq!(cities[1].city_name, "Porto");
        assert_eq!(cities[0].position, Position::new(38.72, -9.14));
    }

    #[tokio::test]
    async fn list_accepts_textual_ids_and_coordinates() {
        let server = MockServer::start().await;
        let mut record = city_json(7, "Faro");
        record["id"] = json!("7");
        record["position"] = json!({ "lat": "37.01", "lng": "-7.93" });
        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([record])))
            .mount(&server)
            .await;

        let cities = collection(&server).list_cities().await.unwrap();

        assert_eq!(cities[0].id, CityId::new(7));
        assert_eq!(cities[0].position, Position::new(37.01, -7.93));
    }

    #[tokio::test]
    async fn get_city_uses_record_path() {
        let server = MockServer::start().await;
        mount_get(&server, 3, "Braga", Duration::ZERO).await;

        let city = collection(&server).get_city(CityId::new(3)).await.unwrap();

        assert_eq!(city.city_name, "Braga");
    }

    #[tokio::test]
    async fn create_city_posts_json_draft() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cities"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({
                "cityName": "Lisbon",
                "notes": "custard tarts",
                "position": { "lat": 38.72, "lng": -9.14 }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(city_json(7, "Lisbon")))
            .expect(1)
            .mount(&server)
            .await;

        let draft = NewCity {
            city_name: "Lisbon".into(),
            country: "Portugal".into(),
            emoji: "🇵🇹".into(),
            date: Utc.with_ymd_and_hms(2027, 10, 31, 15, 59, 59).unwrap(),
            notes: "custard tarts".into(),
            position: Position::new(38.72, -9.14),
        };
        let city = collection(&server).create_city(draft).await.unwrap();

        assert_eq!(city.id, CityId::new(7));
    }

    #[tokio::test]
    async fn create_request_has_no_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(201).set_body_json(city_json(1, "Lisbon")))
            .mount(&server)
            .await;

        let draft = NewCity {
            city_name: "Lisbon".into(),
            country: "Portugal".into(),
            emoji: "🇵🇹".into(),
            date: Utc::now(),
            notes: String::new(),
            position: Position::new(38.72, -9.14),
        };
        collection(&server).create_city(draft).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn delete_city_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/cities/5"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        collection(&server).delete_city(CityId::new(5)).await.unwrap();
    }

    #[tokio::test]
    async fn delete_of_missing_city_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/cities/5"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        collection(&server).delete_city(CityId::new(5)).await.unwrap();
    }

    #[tokio::test]
    async fn trailing_slash_in_base_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let collection = HttpCityCollection::new(&format!("{}/", server.uri())).unwrap();
        assert!(collection.list_cities().await.unwrap().is_empty());
    }
}

// =============================================================================
// Error mapping
// =============================================================================

mod error_mapping {
    use super::*;

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cities/3"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = collection(&server).get_city(CityId::new(3)).await.unwrap_err();

        assert_eq!(err, RemoteError::NotFound("city 3".into()));
    }

    #[tokio::test]
    async fn server_error_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database locked"))
            .mount(&server)
            .await;

        let err = collection(&server).list_cities().await.unwrap_err();

        assert_eq!(
            err,
            RemoteError::Api {
                status: 500,
                message: "database locked".into()
            }
        );
    }

    #[tokio::test]
    async fn empty_error_body_uses_reason_phrase() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/cities/1"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = collection(&server).delete_city(CityId::new(1)).await.unwrap_err();

        assert_eq!(
            err,
            RemoteError::Api {
                status: 503,
                message: "Service Unavailable".into()
            }
        );
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = collection(&server).list_cities().await.unwrap_err();

        assert!(matches!(err, RemoteError::Decode(_)));
    }

    #[tokio::test]
    async fn non_numeric_id_is_decode_error() {
        let server = MockServer::start().await;
        let mut record = city_json(1, "Lisbon");
        record["id"] = json!("a1b2");
        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([record])))
            .mount(&server)
            .await;

        let err = collection(&server).list_cities().await.unwrap_err();

        assert!(matches!(err, RemoteError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = HttpCityCollection::new(&format!("http://127.0.0.1:{}", port))
            .unwrap()
            .list_cities()
            .await
            .unwrap_err();

        assert!(matches!(err, RemoteError::Network(_)));
    }
}

// =============================================================================
// Store over HTTP
// =============================================================================

mod store_over_http {
    use super::*;

    #[tokio::test]
    async fn missing_city_sets_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cities/3"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store =
            CitiesStore::open(Arc::new(collection(&server)), SelectionOrdering::Completion).await;
        store.get_city(CityId::new(3)).await;

        let state = store.snapshot();
        assert_eq!(state.error, LOAD_CITY_FAILED);
        assert!(state.current_city.is_none());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn repeated_delete_is_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([city_json(1, "Lisbon"), city_json(5, "Porto")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/cities/5"))
            .respond_with(ResponseTemplate::new(200))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/cities/5"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store =
            CitiesStore::open(Arc::new(collection(&server)), SelectionOrdering::Completion).await;
        store.delete_city(CityId::new(5)).await;
        store.delete_city(CityId::new(5)).await;

        let state = store.snapshot();
        assert!(state.error.is_empty());
        assert_eq!(state.cities.len(), 1);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn delete_server_error_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([city_json(5, "Porto")])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/cities/5"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store =
            CitiesStore::open(Arc::new(collection(&server)), SelectionOrdering::Completion).await;
        store.delete_city(CityId::new(5)).await;

        let state = store.snapshot();
        assert_eq!(state.error, DELETE_CITY_FAILED);
        assert_eq!(state.cities.len(), 1);
    }

    #[tokio::test]
    async fn slower_response_wins_by_default() {
        let server = MockServer::start().await;
        mount_get(&server, 10, "Porto", Duration::from_millis(300)).await;
        mount_get(&server, 11, "Faro", Duration::ZERO).await;

        let store = CitiesStore::new(Arc::new(collection(&server)), SelectionOrdering::Completion);
        tokio::join!(store.get_city(CityId::new(10)), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            store.get_city(CityId::new(11)).await;
        });

        let state = store.snapshot();
        assert_eq!(state.current_id(), Some(CityId::new(10)));
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn latest_request_wins_when_configured() {
        let server = MockServer::start().await;
        mount_get(&server, 10, "Porto", Duration::from_millis(300)).await;
        mount_get(&server, 11, "Faro", Duration::ZERO).await;

        let store =
            CitiesStore::new(Arc::new(collection(&server)), SelectionOrdering::LatestRequest);
        tokio::join!(store.get_city(CityId::new(10)), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            store.get_city(CityId::new(11)).await;
        });

        let state = store.snapshot();
        assert_eq!(state.current_id(), Some(CityId::new(11)));
        assert!(!state.is_loading());
    }
}

// =============================================================================
// Reverse geocoding
// =============================================================================

mod reverse_geocoding {
    use super::*;

    fn geocoder(server: &MockServer) -> ReverseGeocoder {
        ReverseGeocoder::new(&format!("{}/reverse-geocode-client", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn lookup_sends_position_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse-geocode-client"))
            .and(query_param("latitude", "38.72"))
            .and(query_param("longitude", "-9.14"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "latitude": 38.72,
                "longitude": -9.14,
                "city": "Lisbon",
                "locality": "Baixa",
                "countryName": "Portugal",
                "countryCode": "PT",
                "continent": "Europe"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let place = geocoder(&server)
            .lookup(Position::new(38.72, -9.14))
            .await
            .unwrap();

        assert_eq!(
            place,
            Some(Place {
                city_name: "Lisbon".into(),
                country: "Portugal".into(),
                emoji: "🇵🇹".into(),
            })
        );
    }

    #[tokio::test]
    async fn position_outside_a_country_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse-geocode-client"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": "",
                "locality": "North Atlantic Ocean",
                "countryName": "",
                "countryCode": ""
            })))
            .mount(&server)
            .await;

        let place = geocoder(&server)
            .lookup(Position::new(40.0, -40.0))
            .await
            .unwrap();

        assert!(place.is_none());
    }

    #[tokio::test]
    async fn server_error_is_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse-geocode-client"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let err = geocoder(&server)
            .lookup(Position::new(38.72, -9.14))
            .await
            .unwrap_err();

        assert!(matches!(err, RemoteError::Api { status: 503, .. }));
    }
}
