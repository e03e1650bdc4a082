use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;

use crate::domain::notification::{BillEvent, Channel};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::senders::MessageSender;
use crate::services::bills::get_bill;
use crate::services::notifications::{notification_history, send_bill_notification};

/// Manual re-send request for one channel.
#[derive(Debug, Deserialize)]
pub struct SendNotificationForm {
    pub channel: Channel,
    pub event: BillEvent,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub bill_id: Option<String>,
}

#[post("/stores/{store_id}/bills/{bill_id}/notifications")]
pub async fn send_notification(
    repo: web::Data<DieselRepository>,
    sender: web::Data<dyn MessageSender>,
    path: web::Path<(String, String)>,
    form: web::Json<SendNotificationForm>,
) -> impl Responder {
    let (store_id, bill_id) = path.into_inner();
    let form = form.into_inner();

    // Runs on the blocking pool: delivery talks to SMTP/HTTP providers.
    // Tenant scoping happens here; the dispatcher itself works by bill id.
    let result = web::block(move || {
        get_bill(repo.get_ref(), &store_id, &bill_id)?;
        send_bill_notification(
            repo.get_ref(),
            sender.get_ref(),
            &bill_id,
            form.channel,
            form.event,
        )
    })
    .await;

    match result {
        Ok(Ok(Some(notification))) => HttpResponse::Created().json(notification),
        Ok(Ok(None)) => HttpResponse::NoContent().finish(),
        Ok(Err(err)) => error_response(err, "Failed to send notification"),
        Err(err) => {
            log::error!("Failed to send notification: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/stores/{store_id}/notifications")]
pub async fn show_notifications(
    repo: web::Data<DieselRepository>,
    _path: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    match notification_history(repo.get_ref(), query.bill_id.as_deref()) {
        Ok(notifications) => HttpResponse::Ok().json(notifications),
        Err(err) => error_response(err, "Failed to list notifications"),
    }
}
