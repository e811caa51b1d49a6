//! 프로세스 전역에서 하나의 클라이언트를 공유하기 위한 보관소
//!
//! 첫 생성은 잠금 안에서 이루어지며 [`destroy`] 이후에는 다시 생성할 수 있다.
//! 전송 핸들을 동시에 사용하지 않도록 클라이언트는 내부 [`Mutex`] 로 감싸서 제공한다.

use crate::provider::error::ClientError;
use crate::provider::google::GoogleBooksClient;
use std::sync::{Arc, Mutex, MutexGuard};

pub type SharedClient = Arc<Mutex<GoogleBooksClient>>;

static INSTANCE: Mutex<Option<SharedClient>> = Mutex::new(None);

fn holder() -> MutexGuard<'static, Option<SharedClient>> {
    INSTANCE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 공유 클라이언트를 반환한다. 아직 없다면 `api_key` 로 생성한다.
///
/// 이미 생성된 경우 `api_key` 는 무시된다.
pub fn instance(api_key: &str) -> Result<SharedClient, ClientError> {
    let mut holder = holder();
    if let Some(client) = holder.as_ref() {
        return Ok(Arc::clone(client));
    }

    let client = Arc::new(Mutex::new(GoogleBooksClient::new(api_key)?));
    *holder = Some(Arc::clone(&client));
    Ok(client)
}

pub fn get() -> Option<SharedClient> {
    holder().as_ref().map(Arc::clone)
}

/// 공유 클라이언트를 해제한다. 이미 꺼내간 참조는 마지막 참조가 사라질 때 해제된다.
pub fn destroy() {
    holder().take();
}
