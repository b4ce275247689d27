// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;

#[test]
fn test_login_without_password() {
    let cli = parse(&["dotask", "login", "ada@example.com"]).unwrap();
    match cli.command {
        Command::Login { email, password } => {
            assert_eq!(email, "ada@example.com");
            assert!(password.is_none());
        }
        _ => panic!("Expected Login command"),
    }
}

#[test]
fn test_login_with_password() {
    let cli = parse(&["dotask", "login", "ada@example.com", "-p", "secret"]).unwrap();
    match cli.command {
        Command::Login { password, .. } => assert_eq!(password.as_deref(), Some("secret")),
        _ => panic!("Expected Login command"),
    }
}

#[test]
fn test_login_rejects_blank_email() {
    assert!(parse(&["dotask", "login", "  "]).is_err());
}

#[test]
fn test_register() {
    let cli = parse(&["dotask", "register", "Ada", "ada@example.com"]).unwrap();
    match cli.command {
        Command::Register {
            name,
            email,
            password,
        } => {
            assert_eq!(name, "Ada");
            assert_eq!(email, "ada@example.com");
            assert!(password.is_none());
        }
        _ => panic!("Expected Register command"),
    }
}

#[test]
fn test_logout_and_whoami() {
    assert!(matches!(parse(&["dotask", "logout"]).unwrap().command, Command::Logout));
    match parse(&["dotask", "whoami", "-o", "json"]).unwrap().command {
        Command::Whoami { output } => assert_eq!(output.output, OutputFormat::Json),
        _ => panic!("Expected Whoami command"),
    }
}

#[test]
fn test_profile_requires_a_field() {
    assert!(parse(&["dotask", "profile"]).is_err());
    let cli = parse(&["dotask", "profile", "--name", "Grace"]).unwrap();
    match cli.command {
        Command::Profile { name, email, .. } => {
            assert_eq!(name.as_deref(), Some("Grace"));
            assert!(email.is_none());
        }
        _ => panic!("Expected Profile command"),
    }
}

#[test]
fn test_passwd_flags() {
    let cli = parse(&["dotask", "passwd", "--current", "old", "--new", "new"]).unwrap();
    match cli.command {
        Command::Passwd {
            current,
            new_password,
        } => {
            assert_eq!(current.as_deref(), Some("old"));
            assert_eq!(new_password.as_deref(), Some("new"));
        }
        _ => panic!("Expected Passwd command"),
    }
}

#[test]
fn test_verbose_is_global() {
    let cli = parse(&["dotask", "task", "list", "--verbose"]).unwrap();
    assert!(cli.verbose);
    let cli = parse(&["dotask", "-v", "logout"]).unwrap();
    assert!(cli.verbose);
}

#[test]
fn test_config_subcommands() {
    assert!(matches!(
        parse(&["dotask", "config", "path"]).unwrap().command,
        Command::Config(ConfigCommand::Path)
    ));
    assert!(matches!(
        parse(&["dotask", "config", "show"]).unwrap().command,
        Command::Config(ConfigCommand::Show { .. })
    ));
}
