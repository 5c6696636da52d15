//! Student repository contract and SQLite implementation.
//!
//! # Invariants
//! - `find_by_name_containing` is case-sensitive and treats `%`/`_` literally.
//! - Search results are ordered by `name ASC, id ASC`.
//! - `find_all` is ordered by `id ASC`.

use crate::db::schema::require_current;
use crate::model::student::{NewStudent, Student, StudentId};
use crate::model::ResourceKind;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const STUDENT_SELECT_SQL: &str = "SELECT id, name, email, dob FROM students";

/// Storage contract for student records.
pub trait StudentRepository {
    /// Persists a new student and returns it with its assigned id.
    fn insert(&self, student: &NewStudent) -> RepoResult<Student>;
    fn find_by_id(&self, id: StudentId) -> RepoResult<Option<Student>>;
    fn find_all(&self) -> RepoResult<Vec<Student>>;
    fn exists_by_id(&self, id: StudentId) -> RepoResult<bool>;
    /// Overwrites every stored field of `student.id`.
    fn update(&self, student: &Student) -> RepoResult<()>;
    fn delete_by_id(&self, id: StudentId) -> RepoResult<()>;
    /// Students whose name contains `fragment`, sorted ascending by name.
    fn find_by_name_containing(&self, fragment: &str) -> RepoResult<Vec<Student>>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Constructs a repository over a connection at the current schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        require_current(conn)?;
        Ok(Self { conn })
    }

    fn query_students(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }
        Ok(students)
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn insert(&self, student: &NewStudent) -> RepoResult<Student> {
        student.validate()?;

        self.conn.execute(
            "INSERT INTO students (name, email, dob) VALUES (?1, ?2, ?3);",
            params![student.name.as_str(), student.email.as_str(), student.dob],
        )?;

        Ok(student.clone().into_student(self.conn.last_insert_rowid()))
    }

    fn find_by_id(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_student_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_all(&self) -> RepoResult<Vec<Student>> {
        self.query_students(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn exists_by_id(&self, id: StudentId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM students WHERE id = ?1;", [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn update(&self, student: &Student) -> RepoResult<()> {
        student.validate()?;

        let changed = self.conn.execute(
            "UPDATE students SET name = ?1, email = ?2, dob = ?3 WHERE id = ?4;",
            params![
                student.name.as_str(),
                student.email.as_str(),
                student.dob,
                student.id
            ],
        )?;

        if changed == 0 {
            return Err(not_found(student.id));
        }
        Ok(())
    }

    fn delete_by_id(&self, id: StudentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn find_by_name_containing(&self, fragment: &str) -> RepoResult<Vec<Student>> {
        // instr() is a plain byte match: case-sensitive, no LIKE wildcards.
        self.query_students(
            &format!("{STUDENT_SELECT_SQL} WHERE instr(name, ?1) > 0 ORDER BY name ASC, id ASC;"),
            [fragment],
        )
    }
}

fn not_found(id: StudentId) -> RepoError {
    RepoError::NotFound {
        kind: ResourceKind::Student,
        id,
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let student = Student {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        dob: row.get("dob")?,
    };
    student.validate().map_err(|err| {
        RepoError::InvalidData(format!("students row {} failed validation: {err}", student.id))
    })?;
    Ok(student)
}
