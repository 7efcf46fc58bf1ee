use std::path::Path;

use rusqlite::Connection;

use crate::corpus::Page;
use crate::error::StoreResult;

pub fn connect(path: &Path) -> StoreResult<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS pages (
            id         INTEGER PRIMARY KEY,
            url        TEXT NOT NULL,
            position   INTEGER NOT NULL,
            fetched_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS paragraphs (
            id         INTEGER PRIMARY KEY,
            page_id    INTEGER NOT NULL REFERENCES pages(id) ON DELETE CASCADE,
            position   INTEGER NOT NULL,
            text       TEXT NOT NULL,
            UNIQUE(page_id, position)
        );
        CREATE INDEX IF NOT EXISTS idx_paragraphs_page ON paragraphs(page_id);
        ",
    )?;
    Ok(())
}

/// Replace the stored corpus with `pages` in one transaction.
pub fn replace_corpus(conn: &Connection, pages: &[Page]) -> StoreResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM paragraphs", [])?;
    tx.execute("DELETE FROM pages", [])?;
    {
        let mut page_stmt = tx.prepare("INSERT INTO pages (url, position) VALUES (?1, ?2)")?;
        let mut para_stmt =
            tx.prepare("INSERT INTO paragraphs (page_id, position, text) VALUES (?1, ?2, ?3)")?;
        for (pos, page) in pages.iter().enumerate() {
            page_stmt.execute(rusqlite::params![page.url, pos as i64])?;
            let page_id = tx.last_insert_rowid();
            for (ppos, text) in page.paragraphs.iter().enumerate() {
                para_stmt.execute(rusqlite::params![page_id, ppos as i64, text])?;
            }
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn fetch_corpus(conn: &Connection) -> StoreResult<Vec<Page>> {
    let mut page_stmt = conn.prepare("SELECT id, url FROM pages ORDER BY position")?;
    let rows = page_stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut para_stmt =
        conn.prepare("SELECT text FROM paragraphs WHERE page_id = ?1 ORDER BY position")?;
    let mut pages = Vec::with_capacity(rows.len());
    for (id, url) in rows {
        let paragraphs = para_stmt
            .query_map([id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        pages.push(Page { url, paragraphs });
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn sample() -> Vec<Page> {
        vec![
            Page::new("https://x.test/service", vec!["• Web Development • Mobile Apps".into()]),
            Page::new(
                "https://x.test/about",
                vec!["First paragraph about us".into(), "Second paragraph about us".into()],
            ),
        ]
    }

    #[test]
    fn keeps_page_and_paragraph_order() {
        let conn = memory();
        replace_corpus(&conn, &sample()).unwrap();
        assert_eq!(fetch_corpus(&conn).unwrap(), sample());
    }

    #[test]
    fn replace_drops_previous_corpus() {
        let conn = memory();
        replace_corpus(&conn, &sample()).unwrap();
        let newer = vec![Page::new("https://x.test/contact", vec![])];
        replace_corpus(&conn, &newer).unwrap();
        assert_eq!(fetch_corpus(&conn).unwrap(), newer);
    }

    #[test]
    fn pages_may_share_a_url() {
        let conn = memory();
        let pages = vec![
            Page::new("https://x.test/service", vec!["First fetch of the services page".into()]),
            Page::new("https://x.test/service", vec!["Second fetch of the services page".into()]),
        ];
        replace_corpus(&conn, &pages).unwrap();
        assert_eq!(fetch_corpus(&conn).unwrap(), pages);
    }

    #[test]
    fn empty_database() {
        assert!(fetch_corpus(&memory()).unwrap().is_empty());
    }
}
