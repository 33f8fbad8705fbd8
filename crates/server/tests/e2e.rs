mod support;

use axum::http::StatusCode;
use support::{build_app, login, send, ADMIN};
use serde_json::{json, Value};

fn car(brand: &str, model: &str, location: &str) -> Value {
    json!({
        "brand": brand,
        "model": model,
        "carType": "SUV",
        "mainLocation": location,
        "dailyPrice": 80.0,
        "available": true
    })
}

fn rental(name: &str, car_model: Option<&str>) -> Value {
    json!({
        "customerName": name,
        "phoneNumber": "555-0100",
        "email": "Jane.Doe@Example.com",
        "carModel": car_model,
        "pickupDateTime": "2099-06-01T10:00:00",
        "dropDateTime": "2099-06-04T10:00:00"
    })
}

#[tokio::test]
async fn admin_manages_cars_and_public_reads_them() -> anyhow::Result<()> {
    let app = build_app().await?;
    let admin = login(&app, ADMIN).await?;

    let (status, _) = send(&app, "POST", "/cars", None, Some(car("Toyota", "RAV4", "Colombo"))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "POST", "/cars", Some(&admin), Some(car("Toyota", "RAV4", "Colombo"))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Car added successfully");
    let car_id = body["carId"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(&app, "GET", "/cars", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["totalData"], 1);

    let (status, body) = send(&app, "GET", "/cars/location/colom", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, body) = send(
        &app, "POST", &format!("/cars/{car_id}/images"), Some(&admin),
        Some(json!({ "imageUrl": "https://img.example.com/rav4.jpg" })),
    ).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["imageUrl"], "https://img.example.com/rav4.jpg");

    let (status, body) = send(
        &app, "POST", "/accessories", Some(&admin),
        Some(json!({ "name": "Child seat", "carId": car_id })),
    ).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["carId"], car_id.as_str());

    let (status, body) = send(&app, "GET", &format!("/cars/{car_id}"), None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accessories"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["images"].as_array().map(Vec::len), Some(1));

    let (status, _) = send(&app, "DELETE", &format!("/cars/{car_id}"), Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/accessories", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, "GET", &format!("/cars/{car_id}"), None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Car not found with id: {car_id}"));
    Ok(())
}

#[tokio::test]
async fn car_validation_errors_are_bad_requests() -> anyhow::Result<()> {
    let app = build_app().await?;
    let admin = login(&app, ADMIN).await?;
    let (status, body) = send(&app, "POST", "/cars", Some(&admin), Some(json!({ "model": "RAV4" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["path"], "/cars");

    let (status, _) = send(&app, "GET", "/cars/not-a-uuid", None, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn unsupported_method_gets_error_body() -> anyhow::Result<()> {
    let app = build_app().await?;
    let admin = login(&app, ADMIN).await?;
    let (status, body) = send(&app, "PATCH", "/cars", Some(&admin), Some(car("Kia", "Rio", "Jaffna"))).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["status"], 405);
    assert_eq!(body["error"], "Method Not Allowed");
    assert_eq!(body["message"], "Request method 'PATCH' is not supported");
    assert_eq!(body["path"], "/cars");
    assert!(body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn rental_submission_and_approval_flow() -> anyhow::Result<()> {
    let app = build_app().await?;
    let admin = login(&app, ADMIN).await?;
    let (_, body) = send(&app, "POST", "/cars", Some(&admin), Some(car("Honda", "Vezel", "Kandy"))).await?;
    let car_id = body["carId"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(&app, "POST", "/rentals", None, Some(rental("Jane Doe", None))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["rentalDays"], 3);
    assert_eq!(body["totalAmount"], 300.0);
    let request_id = body["requestId"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(&app, "GET", "/rentals?status=pending", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["customerName"], "Jane Doe");
    assert_eq!(body[0]["email"], "jane.doe@example.com");

    let uri = format!("/rentals/{request_id}/approve?carId={car_id}");
    let (status, body) = send(&app, "POST", &uri, Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "APPROVED");
    assert_eq!(body["carModel"], "Honda Vezel");

    let (_, body) = send(&app, "GET", &format!("/cars/{car_id}"), None, None).await?;
    assert_eq!(body["available"], false);
    let (_, body) = send(&app, "GET", "/cars/available", None, None).await?;
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, "POST", &uri, Some(&admin), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Business Rule Violation");
    assert_eq!(body["path"], format!("/rentals/{request_id}/approve"));
    Ok(())
}

#[tokio::test]
async fn second_request_for_taken_car_conflicts_and_can_be_rejected() -> anyhow::Result<()> {
    let app = build_app().await?;
    let admin = login(&app, ADMIN).await?;
    let (_, body) = send(&app, "POST", "/cars", Some(&admin), Some(car("Suzuki", "Alto", "Galle"))).await?;
    let car_id = body["carId"].as_str().unwrap_or_default().to_string();

    let (_, first) = send(&app, "POST", "/rentals", None, Some(rental("Jane Doe", Some("Alto")))).await?;
    let (_, second) = send(&app, "POST", "/rentals", None, Some(rental("John Roe", Some("Alto")))).await?;
    let first = first["requestId"].as_str().unwrap_or_default().to_string();
    let second = second["requestId"].as_str().unwrap_or_default().to_string();

    let (status, _) = send(&app, "POST", &format!("/rentals/{first}/approve?carId={car_id}"), Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "POST", &format!("/rentals/{second}/approve?carId={car_id}"), Some(&admin), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "POST", &format!("/rentals/{second}/reject?reason=%20"), Some(&admin), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = send(
        &app, "POST", &format!("/rentals/{second}/reject?reason=Car%20already%20booked"), Some(&admin), None,
    ).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "REJECTED");
    assert_eq!(body["reason"], "Car already booked");

    let (_, body) = send(&app, "GET", "/rentals/pending", Some(&admin), None).await?;
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn invalid_submission_names_the_field() -> anyhow::Result<()> {
    let app = build_app().await?;
    let mut body = rental("Jane Doe", None);
    body["email"] = json!("not-an-email");
    let (status, err) = send(&app, "POST", "/rentals", None, Some(body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["message"].as_str().unwrap_or_default().contains("email"));

    let mut body = rental("Jane Doe", None);
    body["dropDateTime"] = json!("2099-05-01T10:00:00");
    let (status, _) = send(&app, "POST", "/rentals", None, Some(body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn admin_updates_and_deletes_requests() -> anyhow::Result<()> {
    let app = build_app().await?;
    let admin = login(&app, ADMIN).await?;
    let (_, body) = send(&app, "POST", "/rentals", None, Some(rental("Jane Doe", None))).await?;
    let id = body["requestId"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(
        &app, "PUT", &format!("/rentals/{id}"), Some(&admin), Some(json!({ "customerName": "Jane Smith" })),
    ).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customerName"], "Jane Smith");

    let (_, body) = send(&app, "GET", "/rentals/customer/smith", Some(&admin), None).await?;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, _) = send(&app, "DELETE", &format!("/rentals/{id}"), Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &format!("/rentals/{id}"), Some(&admin), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
