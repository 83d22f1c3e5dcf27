//! Fixture documents shared by the API tests.

use serde_json::{json, Value as JsonValue};

/// Two families: `p-lan` has children `s1` and `s2`, `p-binh` has `s3`.
/// `p-new` has no children at all.
pub fn fixture_seed() -> JsonValue {
    json!({
        "users": [
            {"_id": "u-nurse", "fullName": "Tran Van Minh", "email": "minh@school.edu",
             "roleId": "r-nurse", "status": "active", "createdAt": "2024-01-01T00:00:00.000Z"},
            {"_id": "p-lan", "fullName": "Nguyen Thi Lan", "email": "lan@mail.com",
             "roleId": "r-parent", "status": "active", "createdAt": "2024-01-02T00:00:00.000Z"},
            {"_id": "p-binh", "fullName": "Pham Van Binh", "email": "binh@mail.com",
             "roleId": "r-parent", "status": "inactive", "createdAt": "2024-01-03T00:00:00.000Z"}
        ],
        "students": [
            {"_id": "s1", "fullName": "Nguyen Minh Anh", "studentCode": "HS0001", "parentId": "p-lan"},
            {"_id": "s2", "fullName": "Nguyen Bao Chau", "studentCode": "HS0002", "parentId": "p-lan"},
            {"_id": "s3", "fullName": "Pham Gia Huy", "studentCode": "HS0003", "parentId": "p-binh"}
        ],
        "healthProfiles": [
            {"_id": "hp1", "studentId": "s1", "bloodType": "A+", "allergies": "peanuts",
             "createdAt": "2024-02-01T00:00:00.000Z"},
            {"_id": "hp2", "studentId": "s2", "bloodType": "O-", "allergies": "none",
             "createdAt": "2024-02-02T00:00:00.000Z"},
            {"_id": "hp3", "studentId": "s3", "bloodType": "B+", "allergies": "pollen",
             "createdAt": "2024-02-03T00:00:00.000Z"}
        ],
        "medicalEvents": [
            {"_id": "me1", "studentId": "s1", "description": "Flu symptoms", "status": "approved",
             "type": "illness", "level": 2, "dateHappened": "2024-03-05T08:00:00.000Z",
             "createdAt": "2024-03-05T08:00:00.000Z"},
            {"_id": "me2", "studentId": "s3", "description": "Scraped knee", "status": "approved",
             "type": "injury", "level": 1, "dateHappened": "2023-12-20T10:00:00.000Z",
             "createdAt": "2023-12-20T10:00:00.000Z"},
            {"_id": "me3", "studentId": "s2", "description": "FLU follow-up", "status": "pending",
             "type": "illness", "level": 2, "dateHappened": "2024-03-09T09:00:00.000Z",
             "createdAt": "2024-03-09T09:00:00.000Z"}
        ],
        "medicationRequests": [
            {"_id": "mr1", "studentId": "s1", "medicineName": "Paracetamol", "status": "pending",
             "requestDate": "2024-04-01T00:00:00.000Z", "createdAt": "2024-04-01T00:00:00.000Z"},
            {"_id": "mr2", "studentId": "s3", "medicineName": "Ibuprofen", "status": "approved",
             "requestDate": "2024-04-02T00:00:00.000Z", "createdAt": "2024-04-02T00:00:00.000Z"}
        ],
        "campaigns": [
            {"_id": "c1", "title": "Measles vaccination", "status": "ongoing", "type": "vaccination",
             "createdBy": "u-nurse", "startDate": "2024-09-01T00:00:00.000Z",
             "createdAt": "2024-08-01T00:00:00.000Z"},
            {"_id": "c2", "title": "Annual eye exam", "status": "planned", "type": "checkup",
             "createdBy": "p-binh", "startDate": "2024-10-01T00:00:00.000Z",
             "createdAt": "2024-08-02T00:00:00.000Z"}
        ],
        "campaignParticipations": [
            {"_id": "cp1", "campaignId": "c1", "studentId": "s1", "parentConsent": "approved",
             "createdAt": "2024-09-02T00:00:00.000Z"},
            {"_id": "cp2", "campaignId": "c1", "studentId": "s3", "parentConsent": "pending",
             "createdAt": "2024-09-03T00:00:00.000Z"}
        ],
        "medicines": (1..=12).map(|n| json!({
            "_id": format!("med{n:02}"),
            "name": format!("Medicine {n:02}"),
            "code": format!("MED-{n:02}"),
            "status": if n % 2 == 0 { "active" } else { "archived" },
            "createdAt": format!("2024-05-{n:02}T00:00:00.000Z")
        })).collect::<Vec<_>>()
    })
}
