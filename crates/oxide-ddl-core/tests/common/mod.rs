#![allow(dead_code)]

use oxide_ddl_core::{DiffOptions, Error, Schema, diff_strings, format_schema, parse_schema};

pub fn parse(sql: &str) -> Schema {
    parse_schema(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> Error {
    match parse_schema(sql) {
        Ok(schema) => panic!("Expected parse error for: {sql}\nGot: {schema:?}"),
        Err(e) => e,
    }
}

pub fn diff_with(before: &str, after: &str, options: &DiffOptions) -> String {
    let mut out = Vec::new();
    diff_strings(&mut out, before, after, options).unwrap_or_else(|e| {
        panic!("Failed to diff.\n  Before: {before}\n  After:  {after}\n  Error:  {e}")
    });
    String::from_utf8(out).expect("diff output is UTF-8")
}

pub fn diff(before: &str, after: &str) -> String {
    diff_with(before, after, &DiffOptions::default())
}

pub fn format(sql: &str) -> String {
    let mut out = Vec::new();
    format_schema(&mut out, sql).unwrap_or_else(|e| panic!("Failed to format: {sql}\nError: {e}"));
    String::from_utf8(out).expect("format output is UTF-8")
}

/// Verifies that formatting is a fixed point and that the formatted text
/// describes the same schema as the input.
pub fn round_trip(sql: &str) {
    let formatted = format(sql);
    let reformatted = format(&formatted);
    assert_eq!(
        formatted, reformatted,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {formatted}\n  Second:   {reformatted}"
    );
    assert_eq!(parse(sql), parse(&formatted), "Formatting changed the schema of {sql}");
    assert_eq!(diff(sql, &formatted), "", "Formatted schema diffs against {sql}");
}

/// A before/after pair and the exact SQL expected between them.
pub struct Scenario {
    pub name: &'static str,
    pub before: &'static str,
    pub after: &'static str,
    pub expect: &'static str,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "drop table",
        before: "CREATE TABLE `hoge` ( `id` integer not null ); CREATE TABLE `fuga` ( `id` INTEGER NOT NULL );",
        after: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL );",
        expect: "DROP TABLE `hoge`;",
    },
    Scenario {
        name: "create table",
        before: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL );",
        after: "CREATE TABLE `hoge` ( `id` INTEGER NOT NULL ) ENGINE=InnoDB; CREATE TABLE `fuga` ( `id` INTEGER NOT NULL );",
        expect: "CREATE TABLE `hoge` (\n`id` INTEGER NOT NULL\n) ENGINE = InnoDB;",
    },
    Scenario {
        name: "drop column",
        before: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL, `c` VARCHAR (20) NOT NULL DEFAULT 'xxx' );",
        after: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL );",
        expect: "ALTER TABLE `fuga` DROP COLUMN `c`;",
    },
    Scenario {
        name: "add column",
        before: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL );",
        after: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL, `c` VARCHAR (20) NOT NULL DEFAULT 'xxx');",
        expect: "ALTER TABLE `fuga` ADD COLUMN `c` VARCHAR (20) NOT NULL DEFAULT \"xxx\";",
    },
    Scenario {
        name: "change column",
        before: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL );",
        after: "CREATE TABLE `fuga` ( `id` BIGINT NOT NULL );",
        expect: "ALTER TABLE `fuga` CHANGE COLUMN `id` `id` BIGINT NOT NULL;",
    },
    Scenario {
        name: "drop primary key",
        before: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL AUTO_INCREMENT, PRIMARY KEY (`id`) );",
        after: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL AUTO_INCREMENT );",
        expect: "ALTER TABLE `fuga` DROP INDEX PRIMARY KEY;",
    },
    Scenario {
        name: "add primary key",
        before: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL AUTO_INCREMENT );",
        after: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL AUTO_INCREMENT, PRIMARY KEY (`id`) );",
        expect: "ALTER TABLE `fuga` ADD PRIMARY KEY (`id`);",
    },
    Scenario {
        name: "drop unique key",
        before: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL AUTO_INCREMENT, CONSTRAINT `symbol` UNIQUE KEY `uniq_id` USING BTREE (`id`) );",
        after: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL AUTO_INCREMENT );",
        expect: "ALTER TABLE `fuga` DROP INDEX `uniq_id`;",
    },
    Scenario {
        name: "add unique key",
        before: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL AUTO_INCREMENT );",
        after: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL AUTO_INCREMENT, CONSTRAINT `symbol` UNIQUE KEY `uniq_id` USING BTREE (`id`) );",
        expect: "ALTER TABLE `fuga` ADD CONSTRAINT `symbol` UNIQUE INDEX `uniq_id` USING BTREE (`id`);",
    },
    Scenario {
        name: "not change index",
        before: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL AUTO_INCREMENT, CONSTRAINT `symbol` UNIQUE KEY `uniq_id` USING BTREE (`id`) );",
        after: "CREATE TABLE `fuga` ( `id` INTEGER NOT NULL AUTO_INCREMENT, CONSTRAINT `symbol` UNIQUE KEY `uniq_id` USING BTREE (`id`) );",
        expect: "",
    },
];
