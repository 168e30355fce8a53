//! PostgreSQL Repository Implementations

use auth::ReadScope;
use chrono::{DateTime, Utc};
use kernel::id::{AnswerId, CourseId, Id, ProblemId, UserId};
use sqlx::PgPool;

use crate::domain::entities::{
    Answer, AnswerPatch, AnswerWithProblem, Course, CoursePatch, CourseRef, CourseSummary,
    Problem, ProblemPatch, ProblemRef, ProblemWithCourse,
};
use crate::domain::repository::{AnswerRepository, CourseRepository, ProblemRepository};
use crate::error::{CurriculumError, CurriculumResult};

const COURSE_COLUMNS: &str = "c.id, c.title, c.description, c.is_public, \
     c.created_by_id, c.updated_by_id, c.created_at, c.updated_at";

const PROBLEM_COLUMNS: &str = "p.id, p.title, p.description, p.is_public, p.course_id, \
     p.created_by_id, p.updated_by_id, p.created_at, p.updated_at";

const ANSWER_COLUMNS: &str = "a.id, a.problem_id, a.title, a.description, a.code, a.is_public, \
     a.created_by_id, a.updated_by_id, a.created_at, a.updated_at";

/// PostgreSQL-backed curriculum repository
#[derive(Clone)]
pub struct PgCurriculumRepository {
    pool: PgPool,
}

impl PgCurriculumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Foreign key violations on a parent column become the parent's not-found
fn map_fk_violation(err: sqlx::Error) -> CurriculumError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23503") {
            match db_err.constraint() {
                Some("problems_course_id_fkey") => return CurriculumError::CourseNotFound,
                Some("answers_problem_id_fkey") => return CurriculumError::ProblemNotFound,
                _ => {}
            }
        }
    }
    CurriculumError::Database(err)
}

fn parse_id<M>(raw: &str, column: &'static str) -> CurriculumResult<Id<M>> {
    Id::parse_str(raw)
        .map_err(|e| CurriculumError::Internal(format!("Invalid {column} in database: {e}")))
}

// ============================================================================
// Courses
// ============================================================================

impl CourseRepository for PgCurriculumRepository {
    async fn list_courses(&self, scope: ReadScope) -> CurriculumResult<Vec<CourseSummary>> {
        let rows = sqlx::query_as::<_, CourseSummaryRow>(&format!(
            r#"
            SELECT {COURSE_COLUMNS},
                (SELECT COUNT(*) FROM problems p
                  WHERE p.course_id = c.id AND ($1 = FALSE OR p.is_public)) AS problem_count
            FROM courses c
            WHERE ($1 = FALSE OR c.is_public)
            ORDER BY c.updated_at DESC, c.id
            "#
        ))
        .bind(scope.public_only())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CourseSummaryRow::into_summary).collect()
    }

    async fn find_course(
        &self,
        id: CourseId,
        scope: ReadScope,
    ) -> CurriculumResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses c WHERE c.id = $1 AND ($2 = FALSE OR c.is_public)"
        ))
        .bind(id.as_str())
        .bind(scope.public_only())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CourseRow::into_course).transpose()
    }

    async fn insert_course(&self, course: &Course) -> CurriculumResult<()> {
        sqlx::query(
            r#"
            INSERT INTO courses (
                id, title, description, is_public,
                created_by_id, updated_by_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(course.id.as_str())
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.is_public)
        .bind(course.created_by_id.as_str())
        .bind(course.updated_by_id.as_str())
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_course(
        &self,
        id: CourseId,
        patch: &CoursePatch,
        actor: UserId,
    ) -> CurriculumResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            UPDATE courses AS c SET
                title = COALESCE($2, c.title),
                description = CASE
                    WHEN $3::TEXT IS NULL THEN c.description
                    WHEN BTRIM($3) = '' THEN NULL
                    ELSE $3
                END,
                is_public = COALESCE($4, c.is_public),
                updated_by_id = $5,
                updated_at = $6
            WHERE c.id = $1
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(id.as_str())
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.is_public)
        .bind(actor.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CourseRow::into_course).transpose()
    }

    async fn delete_course(&self, id: CourseId) -> CurriculumResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            "DELETE FROM courses AS c WHERE c.id = $1 RETURNING {COURSE_COLUMNS}"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CourseRow::into_course).transpose()
    }
}

// ============================================================================
// Problems
// ============================================================================

impl ProblemRepository for PgCurriculumRepository {
    async fn list_problems(&self, scope: ReadScope) -> CurriculumResult<Vec<ProblemWithCourse>> {
        let rows = sqlx::query_as::<_, ProblemWithCourseRow>(&format!(
            r#"
            SELECT {PROBLEM_COLUMNS},
                c.title AS course_title,
                (SELECT COUNT(*) FROM answers a
                  WHERE a.problem_id = p.id AND ($1 = FALSE OR a.is_public)) AS answer_count
            FROM problems p
            LEFT JOIN courses c ON c.id = p.course_id
            WHERE ($1 = FALSE OR p.is_public)
            ORDER BY p.updated_at DESC, p.id
            "#
        ))
        .bind(scope.public_only())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(ProblemWithCourseRow::into_problem_with_course)
            .collect()
    }

    async fn list_problems_in_course(
        &self,
        course_id: CourseId,
        scope: ReadScope,
    ) -> CurriculumResult<Vec<Problem>> {
        let rows = sqlx::query_as::<_, ProblemRow>(&format!(
            r#"
            SELECT {PROBLEM_COLUMNS}
            FROM problems p
            WHERE p.course_id = $1 AND ($2 = FALSE OR p.is_public)
            ORDER BY p.updated_at DESC, p.id
            "#
        ))
        .bind(course_id.as_str())
        .bind(scope.public_only())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ProblemRow::into_problem).collect()
    }

    async fn find_problem(
        &self,
        id: ProblemId,
        scope: ReadScope,
    ) -> CurriculumResult<Option<ProblemWithCourse>> {
        let row = sqlx::query_as::<_, ProblemWithCourseRow>(&format!(
            r#"
            SELECT {PROBLEM_COLUMNS},
                c.title AS course_title,
                (SELECT COUNT(*) FROM answers a
                  WHERE a.problem_id = p.id AND ($2 = FALSE OR a.is_public)) AS answer_count
            FROM problems p
            LEFT JOIN courses c ON c.id = p.course_id
            WHERE p.id = $1 AND ($2 = FALSE OR p.is_public)
            "#
        ))
        .bind(id.as_str())
        .bind(scope.public_only())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProblemWithCourseRow::into_problem_with_course)
            .transpose()
    }

    async fn insert_problem(&self, problem: &Problem, answers: &[Answer]) -> CurriculumResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO problems (
                id, title, description, is_public, course_id,
                created_by_id, updated_by_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(problem.id.as_str())
        .bind(&problem.title)
        .bind(&problem.description)
        .bind(problem.is_public)
        .bind(problem.course_id.as_ref().map(|id| id.as_str()))
        .bind(problem.created_by_id.as_str())
        .bind(problem.updated_by_id.as_str())
        .bind(problem.created_at)
        .bind(problem.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_fk_violation)?;

        for answer in answers {
            insert_answer_row(answer)
                .execute(&mut *tx)
                .await
                .map_err(map_fk_violation)?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn update_problem(
        &self,
        id: ProblemId,
        patch: &ProblemPatch,
        actor: UserId,
    ) -> CurriculumResult<Option<Problem>> {
        let row = sqlx::query_as::<_, ProblemRow>(&format!(
            r#"
            UPDATE problems AS p SET
                title = COALESCE($2, p.title),
                description = CASE
                    WHEN $3::TEXT IS NULL THEN p.description
                    WHEN BTRIM($3) = '' THEN NULL
                    ELSE $3
                END,
                course_id = COALESCE($4, p.course_id),
                is_public = COALESCE($5, p.is_public),
                updated_by_id = $6,
                updated_at = $7
            WHERE p.id = $1
            RETURNING {PROBLEM_COLUMNS}
            "#
        ))
        .bind(id.as_str())
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.course_id.as_ref().map(|id| id.as_str()))
        .bind(patch.is_public)
        .bind(actor.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_fk_violation)?;

        row.map(ProblemRow::into_problem).transpose()
    }

    async fn delete_problem(&self, id: ProblemId) -> CurriculumResult<Option<Problem>> {
        let row = sqlx::query_as::<_, ProblemRow>(&format!(
            "DELETE FROM problems AS p WHERE p.id = $1 RETURNING {PROBLEM_COLUMNS}"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProblemRow::into_problem).transpose()
    }
}

// ============================================================================
// Answers
// ============================================================================

fn insert_answer_row(answer: &Answer) -> sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments> {
    sqlx::query(
        r#"
        INSERT INTO answers (
            id, problem_id, title, description, code, is_public,
            created_by_id, updated_by_id, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(answer.id.as_str())
    .bind(answer.problem_id.as_str())
    .bind(&answer.title)
    .bind(&answer.description)
    .bind(&answer.code)
    .bind(answer.is_public)
    .bind(answer.created_by_id.as_str())
    .bind(answer.updated_by_id.as_str())
    .bind(answer.created_at)
    .bind(answer.updated_at)
}

impl AnswerRepository for PgCurriculumRepository {
    async fn list_answers(
        &self,
        problem_id: ProblemId,
        scope: ReadScope,
    ) -> CurriculumResult<Vec<Answer>> {
        let rows = sqlx::query_as::<_, AnswerRow>(&format!(
            r#"
            SELECT {ANSWER_COLUMNS}
            FROM answers a
            WHERE a.problem_id = $1 AND ($2 = FALSE OR a.is_public)
            ORDER BY a.updated_at DESC, a.id
            "#
        ))
        .bind(problem_id.as_str())
        .bind(scope.public_only())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AnswerRow::into_answer).collect()
    }

    async fn find_answer(
        &self,
        id: AnswerId,
        scope: ReadScope,
    ) -> CurriculumResult<Option<AnswerWithProblem>> {
        let row = sqlx::query_as::<_, AnswerWithProblemRow>(&format!(
            r#"
            SELECT {ANSWER_COLUMNS}, p.title AS problem_title
            FROM answers a
            JOIN problems p ON p.id = a.problem_id
            WHERE a.id = $1 AND ($2 = FALSE OR (a.is_public AND p.is_public))
            "#
        ))
        .bind(id.as_str())
        .bind(scope.public_only())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AnswerWithProblemRow::into_answer_with_problem)
            .transpose()
    }

    async fn insert_answer(&self, answer: &Answer) -> CurriculumResult<()> {
        insert_answer_row(answer)
            .execute(&self.pool)
            .await
            .map_err(map_fk_violation)?;

        Ok(())
    }

    async fn update_answer(
        &self,
        id: AnswerId,
        patch: &AnswerPatch,
        actor: UserId,
    ) -> CurriculumResult<Option<Answer>> {
        let row = sqlx::query_as::<_, AnswerRow>(&format!(
            r#"
            UPDATE answers AS a SET
                title = COALESCE($2, a.title),
                description = COALESCE($3, a.description),
                code = COALESCE($4, a.code),
                is_public = COALESCE($5, a.is_public),
                updated_by_id = $6,
                updated_at = $7
            WHERE a.id = $1
            RETURNING {ANSWER_COLUMNS}
            "#
        ))
        .bind(id.as_str())
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.code)
        .bind(patch.is_public)
        .bind(actor.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AnswerRow::into_answer).transpose()
    }

    async fn delete_answer(&self, id: AnswerId) -> CurriculumResult<Option<Answer>> {
        let row = sqlx::query_as::<_, AnswerRow>(&format!(
            "DELETE FROM answers AS a WHERE a.id = $1 RETURNING {ANSWER_COLUMNS}"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AnswerRow::into_answer).transpose()
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: String,
    title: String,
    description: Option<String>,
    is_public: bool,
    created_by_id: String,
    updated_by_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CourseRow {
    fn into_course(self) -> CurriculumResult<Course> {
        Ok(Course {
            id: parse_id(&self.id, "courses.id")?,
            title: self.title,
            description: self.description,
            is_public: self.is_public,
            created_by_id: parse_id(&self.created_by_id, "courses.created_by_id")?,
            updated_by_id: parse_id(&self.updated_by_id, "courses.updated_by_id")?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CourseSummaryRow {
    #[sqlx(flatten)]
    course: CourseRow,
    problem_count: i64,
}

impl CourseSummaryRow {
    fn into_summary(self) -> CurriculumResult<CourseSummary> {
        Ok(CourseSummary {
            course: self.course.into_course()?,
            problem_count: self.problem_count,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProblemRow {
    id: String,
    title: String,
    description: Option<String>,
    is_public: bool,
    course_id: Option<String>,
    created_by_id: String,
    updated_by_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProblemRow {
    fn into_problem(self) -> CurriculumResult<Problem> {
        let course_id = self
            .course_id
            .as_deref()
            .map(|raw| parse_id(raw, "problems.course_id"))
            .transpose()?;

        Ok(Problem {
            id: parse_id(&self.id, "problems.id")?,
            title: self.title,
            description: self.description,
            is_public: self.is_public,
            course_id,
            created_by_id: parse_id(&self.created_by_id, "problems.created_by_id")?,
            updated_by_id: parse_id(&self.updated_by_id, "problems.updated_by_id")?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProblemWithCourseRow {
    #[sqlx(flatten)]
    problem: ProblemRow,
    course_title: Option<String>,
    answer_count: i64,
}

impl ProblemWithCourseRow {
    fn into_problem_with_course(self) -> CurriculumResult<ProblemWithCourse> {
        let problem = self.problem.into_problem()?;
        let course = problem
            .course_id
            .zip(self.course_title)
            .map(|(id, title)| CourseRef { id, title });

        Ok(ProblemWithCourse {
            problem,
            course,
            answer_count: self.answer_count,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AnswerRow {
    id: String,
    problem_id: String,
    title: String,
    description: String,
    code: String,
    is_public: bool,
    created_by_id: String,
    updated_by_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AnswerRow {
    fn into_answer(self) -> CurriculumResult<Answer> {
        Ok(Answer {
            id: parse_id(&self.id, "answers.id")?,
            problem_id: parse_id(&self.problem_id, "answers.problem_id")?,
            title: self.title,
            description: self.description,
            code: self.code,
            is_public: self.is_public,
            created_by_id: parse_id(&self.created_by_id, "answers.created_by_id")?,
            updated_by_id: parse_id(&self.updated_by_id, "answers.updated_by_id")?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AnswerWithProblemRow {
    #[sqlx(flatten)]
    answer: AnswerRow,
    problem_title: String,
}

impl AnswerWithProblemRow {
    fn into_answer_with_problem(self) -> CurriculumResult<AnswerWithProblem> {
        let answer = self.answer.into_answer()?;
        let problem = ProblemRef {
            id: answer.problem_id,
            title: self.problem_title,
        };
        Ok(AnswerWithProblem { answer, problem })
    }
}
