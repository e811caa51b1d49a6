use thiserror::Error;

/// 도서 검색 클라이언트 사용 중 발생한 에러 열거
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP 전송 핸들 생성에 실패함
    #[error("Failed to initialize HTTP transport: {0}")]
    InitializationFailed(String),

    /// 전송 핸들이 없는 상태(생성 실패 혹은 해제 이후)에서 요청함
    #[error("HTTP transport not initialized")]
    NotInitialized,

    /// URL 해석 실패를 포함한 네트워크 계층의 모든 실패(DNS, 연결 거부, TLS, 타임아웃 등)는 이 에러 하나로 합쳐진다.
    /// 메시지는 고정이며 실제 원인은 `reason` 에 남는다.
    #[error("Failed to get data from URL")]
    RequestFailed { url: String, reason: String },

    /// 응답 본문이 JSON 이 아님. 진단을 위해 원본 본문을 그대로 포함한다.
    #[error("Failed to parse JSON response:\n{body}")]
    ResponseParseFailed { body: String },

    #[error(transparent)]
    InvalidRequest(#[from] RequestError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String), // 유효하지 않은 매개변수
}
