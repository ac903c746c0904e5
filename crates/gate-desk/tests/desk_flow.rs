//! Front-desk workflows against the in-memory directory with fake image
//! host and notifier.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use gate_api::{ApiError, InMemoryDirectory};
use gate_core::entities::{CheckInRequest, MemberFields};
use gate_core::errors::CoreError;
use gate_core::session::SessionContext;
use gate_desk::{AlertStatus, AssumeYes, CheckInSubmission, Desk, DeskError};
use gate_media::{ImageHost, MediaError, SelfieCapture, UploadedImage};
use gate_notify::{Delivery, Notifier, NotifyError, VisitAlert};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct FakeHost {
    rejecting: bool,
    uploads: Mutex<Vec<String>>,
}

impl FakeHost {
    fn count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageHost for FakeHost {
    async fn upload(&self, bytes: Vec<u8>, file_name: &str) -> Result<UploadedImage, MediaError> {
        self.uploads.lock().unwrap().push(file_name.to_string());
        if self.rejecting {
            return Err(MediaError::Upload {
                status: Some(400),
                message: "ImageKit upload failed: Your request contains invalid signature".into(),
            });
        }
        Ok(UploadedImage {
            file_id: format!("f_{}", self.count()),
            name: file_name.to_string(),
            url: format!("https://ik.imagekit.io/demo/visitors/{file_name}"),
            file_path: format!("/visitors/{file_name}"),
            size: bytes.len() as u64,
        })
    }

    async fn delete(&self, _file_id: &str) -> Result<(), MediaError> {
        Ok(())
    }
}

#[derive(Default)]
struct FakeNotifier {
    failing: bool,
    sent: Mutex<Vec<VisitAlert>>,
}

#[async_trait]
impl Notifier for FakeNotifier {
    fn is_configured(&self) -> bool {
        true
    }

    async fn notify(&self, alert: &VisitAlert) -> Result<Delivery, NotifyError> {
        if self.failing {
            return Err(NotifyError::Rejected {
                status: 401,
                message: "Invalid OAuth access token.".into(),
            });
        }
        self.sent.lock().unwrap().push(alert.clone());
        Ok(Delivery {
            message_id: Some("wamid.1".into()),
        })
    }
}

struct Harness {
    desk: Desk,
    host: Arc<FakeHost>,
    notifier: Arc<FakeNotifier>,
}

fn harness(notifier: FakeNotifier) -> Harness {
    harness_with(FakeHost::default(), notifier)
}

fn harness_with(host: FakeHost, notifier: FakeNotifier) -> Harness {
    let host = Arc::new(host);
    let notifier = Arc::new(notifier);
    let desk = Desk::new(Arc::new(InMemoryDirectory::new()), host.clone())
        .with_notifier(notifier.clone());
    Harness {
        desk,
        host,
        notifier,
    }
}

async fn signed_in(desk: &Desk, email: &str) -> SessionContext {
    let mut ctx = SessionContext::anonymous();
    desk.login(&mut ctx, email, "Admin@123").await.expect("login");
    ctx
}

fn asha() -> MemberFields {
    MemberFields {
        name: "Asha".into(),
        email: "a@x.com".into(),
        phone: "+911234567890".into(),
        apartment: "203".into(),
    }
}

fn selfie() -> SelfieCapture {
    SelfieCapture {
        bytes: vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10],
        width: 640,
        height: 640,
        captured_at: Utc::now(),
    }
}

fn ravi(member_id: i64) -> CheckInSubmission {
    CheckInSubmission::new(
        CheckInRequest {
            name: "Ravi".into(),
            phone: "+919999999999".into(),
            vehicle: None,
            purpose: "Guest".into(),
            member_id: Some(member_id),
            selfie_url: None,
        },
        Some(selfie()),
    )
}

#[tokio::test]
async fn asha_receives_ravi_and_he_leaves_once() {
    let h = harness(FakeNotifier::default());
    let mut admin = signed_in(&h.desk, "admin@gmail.com").await;
    let created = h.desk.create_member(&mut admin, &asha()).await.unwrap();
    assert_eq!(created.all.len(), 1);
    let asha_id = created.record.id;

    let mut guard = signed_in(&h.desk, "security@gmail.com").await;
    let outcome = h.desk.check_in(&mut guard, &mut ravi(asha_id)).await.unwrap();

    assert!(outcome.visit.is_open());
    assert_eq!(outcome.visit.member_name.as_deref(), Some("Asha"));
    let url = outcome.visit.selfie_url.clone().unwrap();
    assert!(url.starts_with("https://ik.imagekit.io/demo/visitors/visitor-"));
    assert!(url.ends_with(".jpg"));
    assert_eq!(outcome.visitors.len(), 1);

    assert_eq!(outcome.alert, AlertStatus::Sent);
    let sent = h.notifier.sent.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec![VisitAlert {
            phone: "+911234567890".into(),
            name: "Ravi".into(),
            purpose: "Guest".into(),
            house: "203".into(),
        }]
    );

    let closed = h.desk.check_out(&mut guard, outcome.visit.id).await.unwrap();
    let out = closed.record.checked_out_at.unwrap();
    assert!(out >= closed.record.checked_in_at);
    assert!(closed.all.iter().all(|v| !v.is_open()));

    let again = h.desk.check_out(&mut guard, outcome.visit.id).await.unwrap_err();
    assert!(matches!(again, DeskError::Core(CoreError::NotFound { .. })));

    let all = h.desk.visitors(&mut admin).await.unwrap();
    assert_eq!(all[0].checked_out_at, Some(out));
}

#[tokio::test]
async fn missing_selfie_stops_before_any_upload() {
    let h = harness(FakeNotifier::default());
    let mut admin = signed_in(&h.desk, "admin@gmail.com").await;
    let asha_id = h.desk.create_member(&mut admin, &asha()).await.unwrap().record.id;

    let mut guard = signed_in(&h.desk, "security@gmail.com").await;
    let mut submission = ravi(asha_id);
    submission.selfie = None;
    let err = h.desk.check_in(&mut guard, &mut submission).await.unwrap_err();
    assert_eq!(err.to_string(), "selfie is required");

    let mut empty = ravi(asha_id);
    empty.selfie = Some(SelfieCapture {
        bytes: Vec::new(),
        ..selfie()
    });
    assert!(h.desk.check_in(&mut guard, &mut empty).await.is_err());

    assert_eq!(h.host.count(), 0);
    assert!(h.desk.visitors(&mut admin).await.unwrap().is_empty());
}

#[tokio::test]
async fn rejected_upload_creates_no_visit() {
    let h = harness_with(
        FakeHost {
            rejecting: true,
            ..FakeHost::default()
        },
        FakeNotifier::default(),
    );
    let mut admin = signed_in(&h.desk, "admin@gmail.com").await;
    let asha_id = h.desk.create_member(&mut admin, &asha()).await.unwrap().record.id;

    let mut guard = signed_in(&h.desk, "security@gmail.com").await;
    let mut submission = ravi(asha_id);
    let err = h.desk.check_in(&mut guard, &mut submission).await.unwrap_err();

    assert!(matches!(
        err,
        DeskError::Media(MediaError::Upload {
            status: Some(400),
            ..
        })
    ));
    assert_eq!(h.host.count(), 1);
    assert!(submission.fields.selfie_url.is_none());
    assert!(submission.selfie.is_some());
    assert!(h.desk.visitors(&mut admin).await.unwrap().is_empty());
    assert!(h.notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn blank_field_is_rejected_before_upload() {
    let h = harness(FakeNotifier::default());
    let mut guard = signed_in(&h.desk, "security@gmail.com").await;
    let mut submission = ravi(1);
    submission.fields.name = "   ".into();
    let err = h.desk.check_in(&mut guard, &mut submission).await.unwrap_err();
    assert_eq!(err.to_string(), "name is required");
    assert_eq!(h.host.count(), 0);
}

#[tokio::test]
async fn retry_reuses_the_uploaded_selfie() {
    let h = harness(FakeNotifier::default());
    let mut admin = signed_in(&h.desk, "admin@gmail.com").await;
    let asha_id = h.desk.create_member(&mut admin, &asha()).await.unwrap().record.id;

    let mut guard = signed_in(&h.desk, "security@gmail.com").await;
    let mut submission = ravi(99);
    let err = h.desk.check_in(&mut guard, &mut submission).await.unwrap_err();
    assert!(matches!(err, DeskError::Api(ApiError::NotFound(_))));
    assert_eq!(h.host.count(), 1);
    assert!(submission.fields.selfie_url.is_some());
    assert!(submission.selfie.is_none());

    submission.fields.member_id = Some(asha_id);
    let outcome = h.desk.check_in(&mut guard, &mut submission).await.unwrap();
    assert_eq!(h.host.count(), 1);
    assert_eq!(outcome.visit.selfie_url, submission.fields.selfie_url);
}

#[tokio::test]
async fn failed_alert_does_not_fail_check_in() {
    let h = harness(FakeNotifier {
        failing: true,
        ..Default::default()
    });
    let mut admin = signed_in(&h.desk, "admin@gmail.com").await;
    let asha_id = h.desk.create_member(&mut admin, &asha()).await.unwrap().record.id;

    let mut guard = signed_in(&h.desk, "security@gmail.com").await;
    let outcome = h.desk.check_in(&mut guard, &mut ravi(asha_id)).await.unwrap();
    assert!(matches!(outcome.alert, AlertStatus::Failed(ref m) if m.contains("Invalid OAuth")));
    assert_eq!(outcome.visitors.len(), 1);
}

#[tokio::test]
async fn no_notifier_skips_the_alert() {
    let host = Arc::new(FakeHost::default());
    let desk = Desk::new(Arc::new(InMemoryDirectory::new()), host);
    let mut admin = signed_in(&desk, "admin@gmail.com").await;
    let asha_id = desk.create_member(&mut admin, &asha()).await.unwrap().record.id;

    let outcome = desk.check_in(&mut admin, &mut ravi(asha_id)).await.unwrap();
    assert!(matches!(outcome.alert, AlertStatus::Skipped(_)));
}

#[tokio::test]
async fn member_sees_only_their_visitors() {
    let h = harness(FakeNotifier::default());
    let mut admin = signed_in(&h.desk, "admin@gmail.com").await;
    let asha_id = h.desk.create_member(&mut admin, &asha()).await.unwrap().record.id;
    let kiran = MemberFields {
        name: "Kiran".into(),
        email: "k@x.com".into(),
        phone: "+910000000001".into(),
        apartment: "504".into(),
    };
    let kiran_id = h.desk.create_member(&mut admin, &kiran).await.unwrap().record.id;

    let mut guard = signed_in(&h.desk, "security@gmail.com").await;
    h.desk.check_in(&mut guard, &mut ravi(asha_id)).await.unwrap();
    h.desk.check_in(&mut guard, &mut ravi(kiran_id)).await.unwrap();

    let mut member = signed_in(&h.desk, "a@x.com").await;
    let mine = h.desk.visitors(&mut member).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].member_id, Some(asha_id));
}

#[tokio::test]
async fn declined_delete_changes_nothing() {
    let h = harness(FakeNotifier::default());
    let mut admin = signed_in(&h.desk, "admin@gmail.com").await;
    let asha_id = h.desk.create_member(&mut admin, &asha()).await.unwrap().record.id;
    let visit = h
        .desk
        .check_in(&mut admin, &mut ravi(asha_id))
        .await
        .unwrap()
        .visit;

    let decline = |_: &str| false;
    let err = h
        .desk
        .delete_visitor(&mut admin, visit.id, &decline)
        .await
        .unwrap_err();
    assert!(matches!(err, DeskError::Cancelled));
    assert_eq!(h.desk.visitors(&mut admin).await.unwrap().len(), 1);

    let remaining = h
        .desk
        .delete_visitor(&mut admin, visit.id, &AssumeYes)
        .await
        .unwrap();
    assert!(remaining.is_empty());

    let members = h
        .desk
        .delete_member(&mut admin, asha_id, &AssumeYes)
        .await
        .unwrap();
    assert!(members.is_empty());
}

#[tokio::test]
async fn anonymous_caller_must_sign_in() {
    let h = harness(FakeNotifier::default());
    let mut ctx = SessionContext::anonymous();
    let err = h.desk.check_out(&mut ctx, 1).await.unwrap_err();
    assert!(err.requires_login());
}
