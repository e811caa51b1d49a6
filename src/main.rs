use clap::Parser;
use google_books_rust::config;
use google_books_rust::console::Console;
use google_books_rust::provider::{GoogleBooksClient, Page};
use std::io;
use std::process::ExitCode;
use tracing::{error, info};

/// Google Books 도서 검색 콘솔
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// API 키 (지정 시 키 파일을 읽지 않음)
    #[arg(long)]
    key: Option<String>,

    /// API 키가 저장된 INI 파일 경로
    #[arg(long)]
    key_file: Option<String>,

    #[arg(long)]
    endpoint: Option<String>,

    /// 한 번에 받을 검색 결과 수 (1 이상)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_results: Option<u32>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    config::load_dotenv();

    let mut app_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match config::set_global_logging_config(&app_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let api = app_config.api_mut();
    if let Some(key) = args.key {
        api.set_key(key);
    }
    if let Some(key_file) = args.key_file {
        api.set_key_file(key_file);
    }
    if let Some(endpoint) = args.endpoint {
        api.set_endpoint(endpoint);
    }
    if let Some(max_results) = args.max_results {
        api.set_max_results(max_results);
    }

    if app_config.api().max_results() == 0 {
        error!("maxResults 는 1 이상이어야 합니다.");
        eprintln!("max_results must be at least 1");
        return ExitCode::FAILURE;
    }

    let api_key = match config::resolve_api_key(app_config.api()) {
        Ok(key) => key,
        Err(e) => {
            error!("API 키를 읽을 수 없습니다. => {}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match GoogleBooksClient::new(api_key) {
        Ok(client) => client.with_endpoint(app_config.api().endpoint()),
        Err(e) => {
            error!("클라이언트를 생성할 수 없습니다. => {}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("검색 클라이언트 생성 완료 ({})", client.endpoint());

    let page = Page::new(0, app_config.api().max_results());
    let stdin = io::stdin();
    let mut console = Console::new(&client, page, stdin.lock(), io::stdout(), io::stderr());

    match console.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
