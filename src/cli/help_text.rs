pub(super) const ROOT_LONG_ABOUT: &str = "\
File integrity monitor for detecting changes to sensitive files

Baseward records SHA-256 checksums of the files you choose (configuration files,
binaries, credential stores, ...) in a baseline file, and later reports which of them
have been modified or deleted since.

CORE CONCEPTS:

  Baseline file:
    A single JSON file (integrity_db.json in the current directory unless --db is
    given) mapping the absolute path of every monitored file to its checksum, size,
    modification time and the date it was added. It is rewritten atomically after
    every command that changes it.

  Commands:
    - add:    Start monitoring files or whole directories
    - check:  Compare every monitored file against the baseline
    - list:   Show what is being monitored
    - remove: Stop monitoring files
    - update: Accept the current contents of monitored files as the new baseline

TYPICAL WORKFLOW:

  1. Record a baseline:
     $ baseward add /etc/passwd /etc/ssh/

  2. Later, check for changes:
     $ baseward check

  3. After reviewing an intended change, accept it:
     $ baseward update /etc/ssh/sshd_config

GLOBAL OPTIONS:

  -C <DIRECTORY>
    Change to directory before operating (like git -C or make -C). Relative paths,
    including the default baseline file, are resolved from there.

  --db <PATH>
    Use a different baseline file.

LIMITATIONS:

  Only file contents are compared; permission and ownership changes are not detected.
  Anyone who can write the baseline file can hide changes, so keep it somewhere an
  attacker cannot reach, or copy it off the machine.

For detailed help on any command, use:
  baseward <command> --help
";

pub(super) const ADD_LONG_ABOUT: &str = "\
Start monitoring files or directories

Every regular file named on the command line, and every regular file found anywhere
below a named directory, is checksummed and recorded under its absolute path.
Symlinks are followed; a symlink that loops back into one of its own parent
directories is reported and skipped.

Adding a file that is already monitored replaces its record with the current state.
Paths that do not exist, and files that cannot be read, are reported and skipped
without affecting the rest of the batch.

EXAMPLES:

  $ baseward add /etc/passwd /etc/shadow
  $ baseward add ~/important_docs/
";

pub(super) const CHECK_LONG_ABOUT: &str = "\
Check integrity of all monitored files

Every monitored file is read in full and its checksum compared with the baseline.
Each file is reported as one of:

  INTACT      contents match the baseline (only shown with --all)
  MODIFIED    contents differ; the original and current checksums are shown
  DELETED     the file no longer exists
  UNREADABLE  the file exists but could not be read

A summary with the count for each category follows. The baseline is never modified.

EXIT STATUS:

  0 by default, whatever the outcome. With --exit-code, 1 is returned if any file is
  modified, deleted or unreadable, which makes the command convenient for cron jobs:

  $ baseward check --exit-code || alert_admin
";

pub(super) const UPDATE_LONG_ABOUT: &str = "\
Update the baseline from current file contents

With paths, each named file that is monitored and still exists has its checksum,
size and modification time re-recorded. Without paths, this is done for every
monitored file that still exists. The date a file was first added is kept.

Monitored files that no longer exist are left untouched; use 'check' to find them
and 'remove' to stop monitoring them.

EXAMPLES:

  $ baseward update /etc/passwd
  $ baseward update
";
