//! Canned `/proc` trees for tests and for running the viewer off-Linux.

use super::filesystem::MockFs;

const PASSWD: &str = "\
root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
nobody:x:65534:65534:nobody:/nonexistent:/usr/sbin/nologin
user:x:1000:1000:User:/home/user:/bin/bash
";

const OS_RELEASE: &str = "\
NAME=\"Ubuntu\"
VERSION=\"22.04.3 LTS (Jammy Jellyfish)\"
ID=ubuntu
PRETTY_NAME=\"Ubuntu 22.04.3 LTS\"
VERSION_ID=\"22.04\"
";

fn status(name: &str, pid: u32, uid: u32, vm_size_kb: Option<u64>) -> String {
    let mut s = format!(
        "Name:\t{name}\nUmask:\t0022\nState:\tS (sleeping)\nPid:\t{pid}\nPPid:\t1\n\
         Uid:\t{uid}\t{uid}\t{uid}\t{uid}\nGid:\t{uid}\t{uid}\t{uid}\t{uid}\n"
    );
    if let Some(kb) = vm_size_kb {
        s.push_str(&format!("VmPeak:\t{:>8} kB\nVmSize:\t{:>8} kB\n", kb, kb));
    }
    s.push_str("Threads:\t1\nvoluntary_ctxt_switches:\t10\n");
    s
}

impl MockFs {
    /// A small system: init, a login shell, a short-lived `cat`, and a busy
    /// browser content process whose name contains a space.
    ///
    /// Uptime is 12345 s and `/proc` also holds the usual non-numeric
    /// entries (`self`, `net`, `stat`, ...).
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file("/etc/passwd", PASSWD);
        fs.add_file("/etc/os-release", OS_RELEASE);

        fs.add_file(
            "/proc/version",
            "Linux version 5.15.0-91-generic (buildd@lcy02-amd64-045) (gcc (Ubuntu 11.4.0-1ubuntu1~22.04) 11.4.0, GNU ld (GNU Binutils for Ubuntu) 2.38) #101-Ubuntu SMP Tue Nov 14 13:30:08 UTC 2023\n",
        );
        fs.add_file("/proc/uptime", "12345.67 98765.43\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         4096000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );
        fs.add_dir("/proc/self");
        fs.add_file("/proc/net/dev", "");

        // utime+stime+cutime+cstime = 4500 ticks, started 0 s after boot
        fs.add_process(
            1,
            "1 (systemd) S 0 1 1 0 -1 4194560 50000 1000000 100 500 1000 500 2000 1000 20 0 1 0 1 174080000 3000 18446744073709551615 0 0 0 0 0 0 0 0 1073745152 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
            &status("systemd", 1, 0, Some(170000)),
            "/sbin/init\0splash\0",
        );
        // 450 ticks, started 1000 s after boot
        fs.add_process(
            1000,
            "1000 (bash) S 999 1000 1000 34816 1001 4194304 5000 50000 0 0 100 50 200 100 20 0 1 0 100000 25600000 2000 18446744073709551615 0 0 0 0 0 0 65536 3670020 1266777851 0 0 0 17 2 0 0 0 0 0 0 0 0 0 0 0 0 0",
            &status("bash", 1000, 1000, Some(25000)),
            "/bin/bash\0--login\0",
        );
        // 7 ticks, started 1001 s after boot
        fs.add_process(
            1001,
            "1001 (cat) R 1000 1000 1000 34816 1001 4194304 100 0 0 0 5 2 0 0 20 0 1 0 100100 5120000 500 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 1 0 0 0 0 0 0 0 0 0 0 0 0 0",
            &status("cat", 1001, 1000, Some(5000)),
            "/bin/cat\0file.txt\0",
        );
        // 510000 ticks, started 2000 s after boot
        fs.add_process(
            2000,
            "2000 (Web Content) S 1000 2000 1000 0 -1 4194304 100000 0 500 0 500000 10000 0 0 20 0 20 0 200000 2048000000 50000 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
            &status("Web Content", 2000, 1000, Some(2000000)),
            "/usr/lib/firefox/firefox\0-contentproc\0-childID\x001\0",
        );

        fs
    }

    /// A pid directory that is listed but whose records are already gone,
    /// as when a process exits between enumeration and detail read.
    pub fn with_vanished_process() -> Self {
        let mut fs = Self::typical_system();
        fs.add_dir("/proc/4242");
        fs
    }

    /// A process owned by a uid that has no row in the identity table.
    pub fn with_unknown_owner() -> Self {
        let mut fs = Self::typical_system();
        fs.add_process(
            3000,
            "3000 (worker) S 1 3000 3000 0 -1 4194304 10 0 0 0 300 100 0 0 20 0 1 0 500000 10240000 100 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
            &status("worker", 3000, 4242, Some(10000)),
            "/opt/worker/bin/worker\0",
        );
        fs
    }

    /// A process whose recorded start time lies after the current uptime.
    pub fn with_clock_skew() -> Self {
        let mut fs = Self::typical_system();
        // starttime 5000000 ticks = 50000 s, uptime is 12345 s
        fs.add_process(
            3100,
            "3100 (skewed) R 1 3100 3100 0 -1 4194304 10 0 0 0 900 100 0 0 20 0 1 0 5000000 10240000 100 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
            &status("skewed", 3100, 0, Some(10000)),
            "skewed\0",
        );
        fs
    }

    /// A kernel thread: empty cmdline and no `VmSize` line.
    pub fn with_kernel_thread() -> Self {
        let mut fs = Self::typical_system();
        fs.add_process(
            2,
            "2 (kthreadd) S 0 0 0 0 -1 2129984 0 0 0 0 0 12 0 0 20 0 1 0 2 0 0 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 1 0 0 0 0 0 0 0 0 0 0 0 0 0",
            &status("kthreadd", 2, 0, None),
            "",
        );
        fs
    }

    /// A `/proc` directory with nothing inside it.
    pub fn empty_proc() -> Self {
        let mut fs = Self::new();
        fs.add_dir("/proc");
        fs
    }
}
