//! Raw SQL texts of the orders/documents repositories.
//!
//! Positional `$N` binds work on both supported backends (Postgres natively,
//! SQLite as named parameters). List statements deliberately end without a
//! trailing clause so the sort/pagination suffix can be appended verbatim.

// --- orders ---

pub const INSERT_ORDER: &str = "\
INSERT INTO orders (id, amount, payer_id, payee_id, created_at) \
VALUES ($1, $2, $3, $4, $5)";

pub const GET_ORDERS: &str = "\
SELECT o.id, o.amount, o.created_at, \
       u1.id AS payer_id, u1.name AS payer_name, \
       u2.id AS payee_id, u2.name AS payee_name \
FROM orders o \
JOIN users u1 ON o.payer_id = u1.id \
JOIN users u2 ON o.payee_id = u2.id";

pub const GET_ORDER: &str = "\
SELECT o.id, o.amount, o.created_at, \
       u1.id AS payer_id, u1.name AS payer_name, \
       u2.id AS payee_id, u2.name AS payee_name \
FROM orders o \
JOIN users u1 ON o.payer_id = u1.id \
JOIN users u2 ON o.payee_id = u2.id \
WHERE o.id = $1";

pub const COUNT_ORDERS: &str = "SELECT COUNT(*) AS total FROM orders";

pub const DELETE_ORDER: &str = "DELETE FROM orders WHERE id = $1";

// --- documents ---

pub const INSERT_DOCUMENT: &str = "\
INSERT INTO documents (id, document, created_at, user_id) \
VALUES ($1, $2, $3, $4)";

pub const GET_DOCUMENTS: &str = "\
SELECT id, document, created_at, last_updated_at, user_id FROM documents";

pub const GET_DOCUMENT: &str = "\
SELECT id, document, created_at, last_updated_at, user_id FROM documents \
WHERE id = $1";

pub const UPDATE_DOCUMENT: &str = "\
UPDATE documents SET document = $1, last_updated_at = $2 WHERE id = $3";

pub const COUNT_DOCUMENTS: &str = "SELECT COUNT(*) AS total FROM documents";

pub const DELETE_DOCUMENT: &str = "DELETE FROM documents WHERE id = $1";
