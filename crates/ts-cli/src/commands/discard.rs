//! Discard command: the confirmation gate before exiting with unsaved hours.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::commands::util::with_session;

pub fn run<W: Write>(writer: &mut W, yes: bool, config: &Config) -> Result<()> {
    let discarded = with_session(config, |session| {
        let entries = session.ledger().len();
        session.confirm_exit(yes)?;
        Ok(entries)
    })?;

    if discarded == 0 {
        writeln!(writer, "Nothing to discard.")?;
    } else {
        writeln!(writer, "Discarded {discarded} unsaved entries.")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use ts_core::SessionError;
    use ts_store::StateDir;

    use crate::commands::add;
    use crate::commands::util::test_config;

    #[test]
    fn discard_without_confirmation_keeps_entries() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());
        add::run(&mut Vec::new(), "AOL", "1", &config).unwrap();

        let err = run(&mut Vec::new(), false, &config).unwrap_err();

        assert_eq!(
            err.downcast_ref::<SessionError>(),
            Some(&SessionError::UnsavedExit { entries: 1 })
        );
        let ledger = StateDir::open(temp.path()).unwrap().load_ledger().unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn confirmed_discard_clears_entries() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());
        add::run(&mut Vec::new(), "AOL", "1", &config).unwrap();
        add::run(&mut Vec::new(), "NPIC", "2", &config).unwrap();

        let mut output = Vec::new();
        run(&mut output, true, &config).unwrap();

        let ledger = StateDir::open(temp.path()).unwrap().load_ledger().unwrap();
        assert!(ledger.is_empty());
        assert_snapshot!(String::from_utf8(output).unwrap(), @"Discarded 2 unsaved entries.");
    }

    #[test]
    fn discard_with_nothing_logged() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());

        let mut output = Vec::new();
        run(&mut output, false, &config).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @"Nothing to discard.");
    }
}
