#![allow(unexpected_cfgs)]

use std::{
  env, fs,
  io::{Read, Write},
  path::{Path, PathBuf},
  process::{Command, Stdio},
  thread::{self, JoinHandle},
};

use dyntest::{dyntest, DynTester};

#[cfg(not(rust_analyzer))]
dyntest!(tests);

fn tests(t: &mut DynTester) {
  env::set_current_dir("..").unwrap();

  t.group("run", |t| {
    test_big(t, "tests/programs/arith.big", &[]);
    test_big(t, "tests/programs/comparisons.big", &[]);
    test_big(t, "tests/programs/karatsuba.big", &["--karatsuba-threshold", "1"]);
    test_big(t, "tests/programs/powers.big", &[]);
  });

  t.group("fail", |t| {
    test_big_fail(t, "tests/programs/fail/div_zero.big");
    test_big_fail(t, "tests/programs/fail/parse_error.big");
    test_big_fail(t, "tests/programs/fail/underflow.big");
  });

  t.group("repl", |t| {
    test_big_repl(t, "tests/programs/repl/session.big");
  });

  t.group("threshold", |t| {
    for threshold in ["1", "2", "3", "32"] {
      t.test(threshold, move || {
        let args = ["--karatsuba-threshold", threshold, "run", "tests/programs/karatsuba.big"];
        let (stdout, stderr) = exec(&args, &[], &[], true);
        assert!(stderr.is_empty());
        assert_eq!(stdout, fs::read("tests/snaps/run/karatsuba.txt").unwrap());
      });
    }
    t.test("env", || {
      let envs = [("BIG_KARATSUBA_THRESHOLD", "7")];
      let (stdout, _) = exec(&["repl", "--echo"], b":threshold\n", &envs, true);
      assert_eq!(stdout, b"> :threshold\n7\n");
    });
  });
}

fn name_of(path: &'static str) -> &'static str {
  Path::file_stem(path.as_ref()).unwrap().to_str().unwrap()
}

fn test_big(t: &mut DynTester, path: &'static str, options: &'static [&'static str]) {
  let name = name_of(path);
  t.test(name, move || {
    let args: Vec<_> = options.iter().copied().chain(["run", path]).collect();
    let (stdout, stderr) = exec(&args, &[], &[], true);
    assert!(stderr.is_empty());
    test_snapshot(&["run", &format!("{name}.txt")], &stdout);
  });
}

fn test_big_fail(t: &mut DynTester, path: &'static str) {
  let name = name_of(path);
  t.test(name, move || {
    let (_, stderr) = exec(&["run", path], &[], &[], false);
    test_snapshot(&["fail", &format!("{name}.txt")], &stderr);
  });
}

fn test_big_repl(t: &mut DynTester, path: &'static str) {
  let name = name_of(path);
  t.test(name, move || {
    let input = fs::read_to_string(path).unwrap();
    let (stdout, stderr) = exec(&["repl", "--echo"], input.as_bytes(), &[], true);
    assert!(stderr.is_empty());
    test_snapshot(&["repl", &format!("{name}.txt")], &stdout);
  });
}

fn exec(
  args: &[&str],
  input: &[u8],
  envs: &[(&str, &str)],
  success: bool,
) -> (Vec<u8>, Vec<u8>) {
  let mut child = Command::new(env!("CARGO"))
    .args(["run", "--quiet", "--bin", "big", "--"])
    .args(args)
    .env_remove("BIG_KARATSUBA_THRESHOLD")
    .env_remove("RUST_LOG")
    .env_remove("RUST_BACKTRACE")
    .env_remove("RUST_LIB_BACKTRACE")
    .envs(envs.iter().copied())
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .unwrap();

  child.stdin.take().unwrap().write_all(input).unwrap();

  let stdout = parallel_read(child.stdout.take().unwrap());
  let stderr = parallel_read(child.stderr.take().unwrap());

  let status = child.wait().unwrap();
  if status.success() != success {
    let err = String::from_utf8(stderr.join().unwrap()).unwrap();
    eprintln!("{err}");
    panic!("{status}");
  }

  (stdout.join().unwrap(), stderr.join().unwrap())
}

fn test_snapshot(components: &[&str], contents: &[u8]) -> PathBuf {
  let path = get_snapshot_path(components);
  let existing = fs::read(&path).ok();
  if existing.is_none_or(|x| x != contents) {
    if should_write_snapshot() {
      println!("updating snapshot {:?}", path);
      fs::write(&path, contents).unwrap();
    } else {
      panic!("invalid snapshot {:?}", path);
    }
  }
  path
}

fn get_snapshot_path(components: &[&str]) -> PathBuf {
  let mut path = PathBuf::from("tests/snaps");
  path.extend(components);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  path
}

fn should_write_snapshot() -> bool {
  std::env::var("SNAP_CHECK").is_err()
}

fn parallel_read(mut read: impl Read + Send + 'static) -> JoinHandle<Vec<u8>> {
  thread::spawn(move || {
    let mut buf = Vec::new();
    read.read_to_end(&mut buf).unwrap();
    buf
  })
}
