use crate::provider::document::Document;
use crate::provider::error::ClientError;
use crate::provider::google::BookClient;
use crate::provider::query::Page;
use crate::provider::transport::{ResponseParser, Transport};
use std::io;
use std::io::{BufRead, Write};
use tracing::info;

const MENU: &'static str = "\nSearch books menu:\n1) general string\n2) by subject\n3) by author\n4) by title\n5) by isbn\n9) quit\nEnter you choice, please: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Search(SearchField),
    Quit,
}

/// 검색 메뉴에서 검색어와 함께 사용할 한정자
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Term,
    Subject,
    Author,
    Title,
    Isbn,
}

impl MenuOption {
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(MenuOption::Search(SearchField::Term)),
            "2" => Some(MenuOption::Search(SearchField::Subject)),
            "3" => Some(MenuOption::Search(SearchField::Author)),
            "4" => Some(MenuOption::Search(SearchField::Title)),
            "5" => Some(MenuOption::Search(SearchField::Isbn)),
            "9" => Some(MenuOption::Quit),
            _ => None,
        }
    }
}

/// 대화형 검색 메뉴
///
/// # Description
/// 입력이 끝나거나 종료 메뉴를 선택할 때까지 검색을 반복한다.
/// 검색 중 발생한 에러는 `err` 에 출력하고 같은 클라이언트로 메뉴를 계속 진행한다.
pub struct Console<'c, T, P, R, W, E> {
    client: &'c BookClient<T, P>,
    page: Page,
    input: R,
    out: W,
    err: E,
}

impl<'c, T, P, R, W, E> Console<'c, T, P, R, W, E>
where
    T: Transport,
    P: ResponseParser,
    R: BufRead,
    W: Write,
    E: Write,
{
    pub fn new(client: &'c BookClient<T, P>, page: Page, input: R, out: W, err: E) -> Self {
        Self { client, page, input, out, err }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.out, "{}", MENU)?;
            self.out.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            let field = match MenuOption::from_input(&line) {
                Some(MenuOption::Quit) => {
                    writeln!(self.out, "Exiting...")?;
                    return Ok(());
                }
                Some(MenuOption::Search(field)) => field,
                None => {
                    writeln!(self.out, "Invalid option. Please try again.")?;
                    continue;
                }
            };

            let Some(term) = self.prompt("Enter search term: ")? else {
                return Ok(());
            };

            let result = match field {
                SearchField::Term => self.client.search_by_term(&term, self.page),
                SearchField::Subject => match self.prompt("Enter subject: ")? {
                    Some(subject) => self.client.search_by_subject(&term, &subject, self.page),
                    None => return Ok(()),
                },
                SearchField::Author => match self.prompt("Enter author: ")? {
                    Some(author) => self.client.search_by_author(&term, &author, self.page),
                    None => return Ok(()),
                },
                SearchField::Title => match self.prompt("Enter title: ")? {
                    Some(title) => self.client.search_by_title(&term, &title, self.page),
                    None => return Ok(()),
                },
                SearchField::Isbn => self.client.search_by_isbn(&term, self.page),
            };

            self.report(result)?;
        }
    }

    fn report(&mut self, result: Result<Document, ClientError>) -> io::Result<()> {
        let books = match result {
            Ok(books) => books,
            Err(e) => return writeln!(self.err, "{}", e),
        };

        if let Some(api_error) = books.api_error() {
            return writeln!(self.err, "{}", api_error);
        }

        let total_items = books.total_items();
        info!("검색 결과 {} 건", total_items);
        if total_items > 0 {
            writeln!(self.out, "{} book(s) found.", total_items)?;
            for book in books.items() {
                writeln!(self.out, "{}", book)?;
            }
        } else {
            writeln!(self.out, "No items found using the term provided.")?;
        }

        Ok(())
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;
        self.read_line()
    }

    /// 입력이 끝났으면 `None`
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}
