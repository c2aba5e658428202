//! File shaped endpoints: guest list import/export, the invitation QR code
//! and the client-rendered image download relay.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use invitr_export::{Attachment, DownloadFormat, download::safe_title};
use invitr_types::api::{
    DownloadRequest, ExportQuery, GuestResponse, ImportGuestsResponse, QrCodeResponse,
};

use crate::error::{ApiError, ApiResult};
use crate::extract::{CurrentUser, Json};
use crate::{AppState, blocking};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const CSV_CONTENT_TYPE: &str = "text/csv";

pub async fn import_guests(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        upload = Some((file_name, data));
        break;
    }

    let (file_name, data) = upload.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    if file_name.is_empty() {
        return Err(ApiError::bad_request("No file selected"));
    }
    if !file_name.ends_with(".csv") {
        return Err(ApiError::bad_request("Only CSV files are supported"));
    }

    let guests = blocking(&state, move |state| {
        state.owned_event(&event_id, &user)?;
        let parsed = invitr_export::import_guests_csv(&data[..])
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        let created = state.db.insert_guests(&event_id, &parsed)?;
        info!("Imported {} guests into event {}", created.len(), event_id);
        Ok(created)
    })
    .await?;

    let guests: Vec<GuestResponse> = guests.into_iter().map(GuestResponse::from).collect();
    Ok((
        StatusCode::CREATED,
        Json(ImportGuestsResponse {
            message: format!("Successfully imported {} guests", guests.len()),
            count: guests.len(),
            guests,
        }),
    ))
}

pub async fn export_guests(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Response> {
    let format = query.format.unwrap_or_else(|| "excel".to_string());
    if format != "excel" && format != "csv" {
        return Err(ApiError::bad_request("Invalid format. Use excel or csv"));
    }

    let attachment = blocking(&state, move |state| {
        let event = state.owned_event(&event_id, &user)?;
        let guests: Vec<GuestResponse> = state
            .db
            .list_guests(&event_id)?
            .into_iter()
            .map(GuestResponse::from)
            .collect();

        let title = safe_title(&event.title);
        Ok(if format == "csv" {
            Attachment {
                file_name: format!("{title}_guests.csv"),
                content_type: CSV_CONTENT_TYPE,
                bytes: invitr_export::export_guests_csv(&guests)?.into_bytes(),
            }
        } else {
            Attachment {
                file_name: format!("{title}_guests.xlsx"),
                content_type: XLSX_CONTENT_TYPE,
                bytes: invitr_export::export_guests_xlsx(&guests)?,
            }
        })
    })
    .await?;

    Ok(attachment_response(attachment))
}

pub async fn qrcode(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
) -> ApiResult<Json<QrCodeResponse>> {
    blocking(&state, move |state| {
        state.owned_event(&event_id, &user)?;
        let invitation_url = format!("{}/event/{}", state.public_url.trim_end_matches('/'), event_id);
        let path = invitr_export::generate_qr_code(&invitation_url, &event_id, &state.qr_dir)?;
        info!("QR code for event {} written to {}", event_id, path.display());

        Ok(Json(QrCodeResponse {
            qr_code_url: format!("/static/qrcodes/{}", invitr_export::qr_file_name(&event_id)),
            invitation_url,
        }))
    })
    .await
}

pub async fn download(Json(req): Json<DownloadRequest>) -> ApiResult<Response> {
    let format: DownloadFormat = req
        .format
        .parse()
        .map_err(|()| ApiError::bad_request("Invalid format"))?;

    let attachment = format.render(&req.image, req.title.as_deref()).map_err(|e| {
        warn!("Rejected download: {:#}", e);
        ApiError::bad_request("Invalid image data")
    })?;
    Ok(attachment_response(attachment))
}

fn attachment_response(attachment: Attachment) -> Response {
    (
        [
            (header::CONTENT_TYPE, attachment.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", attachment.file_name),
            ),
        ],
        attachment.bytes,
    )
        .into_response()
}
