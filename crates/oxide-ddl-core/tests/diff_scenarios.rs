//! End-to-end diff scenarios, compared byte-for-byte.

mod common;
use common::*;

use oxide_ddl_core::DiffOptions;

#[test]
fn scenarios_match_expected_sql() {
    for scenario in SCENARIOS {
        assert_eq!(
            diff(scenario.before, scenario.after),
            scenario.expect,
            "scenario: {}",
            scenario.name
        );
    }
}

#[test]
fn self_diff_is_empty() {
    for scenario in SCENARIOS {
        assert_eq!(diff(scenario.before, scenario.before), "", "{}", scenario.name);
        assert_eq!(diff(scenario.after, scenario.after), "", "{}", scenario.name);
    }
}

#[test]
fn diff_is_deterministic() {
    let before = "CREATE TABLE a (x INT); CREATE TABLE b (x INT, y INT, KEY (y));";
    let after = "CREATE TABLE c (x INT); CREATE TABLE b (x BIGINT, z INT, UNIQUE (z));";
    let first = diff(before, after);
    for _ in 0..10 {
        assert_eq!(diff(before, after), first);
    }
}

#[test]
fn textually_different_equal_schemas_diff_to_nothing() {
    let before = "CREATE TABLE `users` (
        `id` BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
        `email` VARCHAR(255) NOT NULL DEFAULT '',
        PRIMARY KEY (`id`),
        UNIQUE KEY `uniq_email` (`email`)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;";
    let after = "-- reformatted
    create table users (
      id bigint unsigned auto_increment not null primary key,
      email varchar ( 255 ) default \"\" not null,
      unique index uniq_email (email)
    ) default charset utf8mb4, engine InnoDB;";
    assert_eq!(diff(before, after), "");
}

#[test]
fn drops_precede_creates_precede_alters() {
    let before = "CREATE TABLE keep (a INT); CREATE TABLE gone (a INT);";
    let after = "CREATE TABLE keep (a INT, b INT); CREATE TABLE fresh (a INT);";
    assert_eq!(
        diff(before, after),
        "DROP TABLE `gone`;\n\
         CREATE TABLE `fresh` (\n`a` INT\n);\n\
         ALTER TABLE `keep` ADD COLUMN `b` INT;"
    );
}

#[test]
fn actions_of_one_table_share_one_statement() {
    let before = "CREATE TABLE `t` (
        `a` INT NOT NULL,
        `b` INT,
        `c` INT,
        PRIMARY KEY (`a`),
        KEY `idx_b` (`b`)
    ) ENGINE=InnoDB;";
    let after = "CREATE TABLE `t` (
        `a` BIGINT NOT NULL,
        `c` INT,
        `d` VARCHAR(10) DEFAULT NULL,
        PRIMARY KEY (`a`, `c`),
        KEY `idx_d` (`d`)
    ) ENGINE=MyISAM;";
    assert_eq!(
        diff(before, after),
        "ALTER TABLE `t` DROP COLUMN `b`, \
         ADD COLUMN `d` VARCHAR (10), \
         CHANGE COLUMN `a` `a` BIGINT NOT NULL, \
         DROP INDEX PRIMARY KEY, \
         ADD PRIMARY KEY (`a`, `c`), \
         DROP INDEX `idx_b`, \
         ADD INDEX `idx_d` (`d`), \
         ENGINE = MyISAM;"
    );
}

#[test]
fn foreign_keys() {
    let before = "CREATE TABLE post (author_id INT, FOREIGN KEY (author_id) REFERENCES user (id));";
    let after = "CREATE TABLE post (author_id INT, CONSTRAINT fk_author FOREIGN KEY (author_id) REFERENCES user (id) ON DELETE CASCADE);";
    assert_eq!(
        diff(before, after),
        "ALTER TABLE `post` DROP FOREIGN KEY `post_ibfk_1`, \
         ADD CONSTRAINT `fk_author` FOREIGN KEY (`author_id`) REFERENCES `user` (`id`) ON DELETE CASCADE;"
    );
}

#[test]
fn renamed_column_is_drop_and_add() {
    assert_eq!(
        diff(
            "CREATE TABLE t (old_name INT NOT NULL);",
            "CREATE TABLE t (new_name INT NOT NULL);"
        ),
        "ALTER TABLE `t` DROP COLUMN `old_name`, ADD COLUMN `new_name` INT NOT NULL;"
    );
}

#[test]
fn transaction_wraps_statements() {
    let options = DiffOptions::new().with_transaction(true);
    assert_eq!(
        diff_with(SCENARIOS[0].before, SCENARIOS[0].after, &options),
        "BEGIN;\n\nSET FOREIGN_KEY_CHECKS = 0;\n\nDROP TABLE `hoge`;\n\nSET FOREIGN_KEY_CHECKS = 1;\n\nCOMMIT;"
    );
    assert_eq!(
        diff_with(SCENARIOS[9].before, SCENARIOS[9].after, &options),
        ""
    );
}

#[test]
fn string_literals_are_double_quoted_and_escaped() {
    assert_eq!(
        diff(
            "CREATE TABLE t (a INT);",
            "CREATE TABLE t (a INT, b VARCHAR(10) DEFAULT 'it''s \\\\ \"q\"' COMMENT 'note');"
        ),
        "ALTER TABLE `t` ADD COLUMN `b` VARCHAR (10) DEFAULT \"it's \\\\ \\\"q\\\"\" COMMENT \"note\";"
    );
}

#[test]
fn non_ddl_statements_do_not_participate() {
    let before = "SET NAMES utf8mb4; CREATE TABLE t (a INT);";
    let after = "/*!40101 SET character_set_client = utf8 */; DROP TABLE IF EXISTS t; CREATE TABLE t (a INT); INSERT INTO t VALUES (1);";
    assert_eq!(diff(before, after), "");
}

#[test]
fn inline_unique_equals_unique_key() {
    assert_eq!(
        diff("CREATE TABLE t (a INT UNIQUE);", "CREATE TABLE t (a INT, UNIQUE KEY (a));"),
        ""
    );
    assert_eq!(
        diff("CREATE TABLE t (a INT UNIQUE);", "CREATE TABLE t (a INT);"),
        "ALTER TABLE `t` DROP INDEX `a`;"
    );
    assert_eq!(
        diff("CREATE TABLE t (a INT);", "CREATE TABLE t (a INT UNIQUE KEY);"),
        "ALTER TABLE `t` ADD UNIQUE INDEX (`a`);"
    );
}

#[test]
fn value_case_is_not_a_change() {
    assert_eq!(
        diff(
            "CREATE TABLE t (a INT) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;",
            "CREATE TABLE t (a INT) ENGINE=innodb DEFAULT CHARSET=UTF8MB4;"
        ),
        ""
    );
    assert_eq!(
        diff(
            "CREATE TABLE t (a TEXT CHARACTER SET utf8mb4 COLLATE utf8mb4_bin);",
            "CREATE TABLE t (a TEXT CHARACTER SET UTF8MB4 COLLATE UTF8MB4_BIN);"
        ),
        ""
    );
}

#[test]
fn dump_literals_and_index_options() {
    let before = "CREATE TABLE t (f BIT(1) NOT NULL DEFAULT b'0', a INT, KEY k (a) COMMENT 'x');";
    assert_eq!(diff(before, before), "");
    assert_eq!(
        diff(
            "CREATE TABLE t (a INT);",
            "CREATE TABLE t (a INT, f BIT(1) NOT NULL DEFAULT b'1', KEY k (a) COMMENT 'x' INVISIBLE);"
        ),
        "ALTER TABLE `t` ADD COLUMN `f` BIT (1) NOT NULL DEFAULT b'1', \
         ADD INDEX `k` (`a`) COMMENT \"x\" INVISIBLE;"
    );
}

#[test]
fn equivalent_defaults_are_not_a_change() {
    assert_eq!(diff("CREATE TABLE t (a INT);", "CREATE TABLE t (a INT DEFAULT NULL);"), "");
    assert_eq!(
        diff(
            "CREATE TABLE t (ts TIMESTAMP NOT NULL DEFAULT NOW());",
            "CREATE TABLE t (ts TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP());"
        ),
        ""
    );
}
