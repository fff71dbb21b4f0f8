//! Interactive shell driving the [`State`] with [`Event`]s read line by line.

use std::io;

use common::DateTime;
use derive_more::{Display, Error as StdError, From};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt as _, AsyncWrite, AsyncWriteExt as _,
};
use tracing as log;

use crate::{view, Event, Service, State};

/// Prompt printed before reading a line.
const PROMPT: &str = "> ";

/// Runs the shell until the `input` ends or `quit` is entered.
///
/// # Errors
///
/// - If the `input` cannot be read or the `output` cannot be written.
/// - If the initial [`State`] cannot be loaded.
pub async fn run<R, W>(
    service: &Service,
    mut input: R,
    mut output: W,
) -> Result<(), Error>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut state = State::load(service).await?;
    print(&mut output, &view::render(&state, DateTime::now())).await?;

    let mut line = String::new();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            break;
        }

        let page = match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => view::HELP.to_owned(),
            cmd => match cmd.parse::<Event>() {
                Err(e) => format!("error: {e}"),
                Ok(ev) => match state.dispatch(service, ev).await {
                    Ok(()) => view::render(&state, DateTime::now()),
                    Err(e) => {
                        log::debug!("`{cmd}` failed: {e}");
                        format!("error: {}", e.message)
                    }
                },
            },
        };
        print(&mut output, &page).await?;
    }

    output.flush().await?;
    Ok(())
}

/// Writes the provided `page` followed by a blank line.
async fn print<W>(output: &mut W, page: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(page.trim_end().as_bytes()).await?;
    output.write_all(b"\n\n").await
}

/// Error of running the shell.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Input or output failed.
    #[display("Shell I/O failed: {_0}")]
    Io(io::Error),

    /// Initial [`State`] failed to load.
    #[display("Failed to load the catalog: {_0}")]
    Load(crate::Error),
}

#[cfg(test)]
mod spec {
    use service::{infra::Memory, Config};

    use crate::Service;

    use super::run;

    async fn session(input: &str) -> String {
        let service = Service::new(Config::default(), Memory::with_fixture());
        let mut output = Vec::new();

        run(&service, input.as_bytes(), &mut output).await.unwrap();

        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn renders_page_after_each_event() {
        let out = session("district chilanzar\n\nopen p5\nquit\nclear\n").await;

        assert!(out.starts_with("/search\n8 listings found"), "{out}");
        assert!(out.contains("/search?district=chilanzar\n1 listing found"));
        assert!(out.contains("Affordable Studio in Chilanzar [p5]\n"));
        assert_eq!(out.matches("8 listings found").count(), 1, "{out}");
        assert_eq!(out.matches("> ").count(), 4);
    }

    #[tokio::test]
    async fn reports_errors_and_keeps_going() {
        let out = session("dance\nnext\nterm 7\nbook p2\nterm 6\n").await;

        assert!(out.contains("error: unknown command"), "{out}");
        assert!(out.contains("error: No booking in progress"));
        assert!(out.contains("error: term must be 6, 12 or 24 months"));
        assert!(out.contains("Booking Spacious 3-Room Apartment in Yunusabad"));
        assert!(out.contains("error: Minimum stay is 12 months"));
    }

    #[tokio::test]
    async fn browses_catalog_pages() {
        let out = session(
            "save p2\nfavorites\nunsave p2\nhome\ndistricts\n\
             district-page sergeli\n",
        )
        .await;

        assert!(out.contains("My Favorites\n1 property saved\n"), "{out}");
        assert!(out.contains("* [p2] Spacious 3-Room Apartment in Yunusabad"));
        assert!(out.contains("My Favorites\n0 properties saved\n"));
        assert!(out.contains("Hand-Picked Properties\n"));
        assert!(out.contains("Just Listed\n"));
        assert!(out.contains("Popular districts\n"));
        assert!(out.contains("Sergeli (sergeli)\n"));
        assert!(out.contains("189 properties, average"));
    }

    #[tokio::test]
    async fn stops_at_end_of_input() {
        let out = session("help").await;

        assert!(out.contains("book <id>"));
        assert!(out.ends_with("> "), "{out}");
    }
}
